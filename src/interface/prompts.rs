use dialoguer::{Confirm, Input, Select};

use crate::error::Result;
use crate::models::{parse_age, parse_measurement, DietPreference, Goal, ProfileForm};

/// Ask a numeric question, re-prompting until the answer parses.
fn prompt_number<F>(question: &str, check: F) -> Result<String>
where
    F: Fn(&str) -> Result<()>,
{
    let input: String = Input::new()
        .with_prompt(question)
        .validate_with(|value: &String| check(value.as_str()).map_err(|e| e.to_string()))
        .interact_text()?;
    Ok(input.trim().to_string())
}

/// What's your age?
pub fn prompt_age() -> Result<String> {
    prompt_number("What's your age?", |v| parse_age(v).map(|_| ()))
}

/// What's your height? (cm)
pub fn prompt_height() -> Result<String> {
    prompt_number("What's your height? (cm)", |v| {
        parse_measurement("height", v).map(|_| ())
    })
}

/// What's your weight? (kg)
pub fn prompt_weight() -> Result<String> {
    prompt_number("What's your weight? (kg)", |v| {
        parse_measurement("weight", v).map(|_| ())
    })
}

pub fn prompt_goal() -> Result<Goal> {
    let labels: Vec<&str> = Goal::ALL.iter().map(|g| g.label()).collect();
    let selection = Select::new()
        .with_prompt("What's your fitness goal?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Goal::ALL[selection])
}

pub fn prompt_diet() -> Result<DietPreference> {
    let labels: Vec<&str> = DietPreference::ALL.iter().map(|d| d.label()).collect();
    let selection = Select::new()
        .with_prompt("What's your diet preference?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(DietPreference::ALL[selection])
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Run the five wizard questions in order.
pub fn collect_profile_form() -> Result<ProfileForm> {
    println!("Meet your AI fitness coach: five questions to a personalized plan.");
    println!();

    let age = prompt_age()?;
    let height = prompt_height()?;
    let weight = prompt_weight()?;
    let goal = prompt_goal()?;
    let diet = prompt_diet()?;

    Ok(ProfileForm {
        age,
        height,
        weight,
        goal: goal.label().to_string(),
        diet: diet.label().to_string(),
    })
}
