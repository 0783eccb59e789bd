use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::models::ProfileForm;

/// Gym coach: personalized calorie, macro and training plans.
#[derive(Parser, Debug)]
#[command(name = "gym_coach")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the TOML config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Skip the remote provider and use the local calculator only.
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer five questions interactively and get a plan.
    Wizard,

    /// Generate a plan from command-line answers.
    Plan(PlanArgs),

    /// Serve the plan endpoint for browser clients.
    Serve {
        /// Address to listen on (overrides the config file).
        #[arg(long)]
        bind: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Wizard
    }
}

/// Answers are parsed with the same rules as the wizard.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Age in years.
    #[arg(long)]
    pub age: String,

    /// Height in cm.
    #[arg(long)]
    pub height: String,

    /// Weight in kg.
    #[arg(long)]
    pub weight: String,

    /// Fat Loss, Muscle Building, Strength or Maintenance.
    #[arg(long)]
    pub goal: String,

    /// Vegetarian or Non-Vegetarian.
    #[arg(long)]
    pub diet: String,

    /// Print the plan as JSON.
    #[arg(long)]
    pub json: bool,
}

impl PlanArgs {
    pub fn to_form(&self) -> ProfileForm {
        ProfileForm {
            age: self.age.clone(),
            height: self.height.clone(),
            weight: self.weight.clone(),
            goal: self.goal.clone(),
            diet: self.diet.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_command() {
        let cli = Cli::parse_from([
            "gym_coach",
            "plan",
            "--age",
            "25",
            "--height",
            "175",
            "--weight",
            "70",
            "--goal",
            "Fat Loss",
            "--diet",
            "Vegetarian",
            "--json",
            "--offline",
        ]);
        assert!(cli.offline);
        match cli.command {
            Some(Command::Plan(args)) => {
                assert!(args.json);
                assert_eq!(args.to_form().goal, "Fat Loss");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_default_command_is_wizard() {
        let cli = Cli::parse_from(["gym_coach", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command.unwrap_or_default(), Command::Wizard));
    }
}
