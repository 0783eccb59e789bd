use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{CoachError, Result};

/// Training goal chosen in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Goal {
    FatLoss,
    MuscleBuilding,
    Strength,
    Maintenance,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::FatLoss,
        Goal::MuscleBuilding,
        Goal::Strength,
        Goal::Maintenance,
    ];

    /// Human-readable label, also the value sent over the wire.
    pub fn label(self) -> &'static str {
        match self {
            Goal::FatLoss => "Fat Loss",
            Goal::MuscleBuilding => "Muscle Building",
            Goal::Strength => "Strength",
            Goal::Maintenance => "Maintenance",
        }
    }

    /// Match a goal label, ignoring case, spaces, dashes and underscores.
    ///
    /// Returns `None` for labels that match no known goal.
    pub fn from_label(label: &str) -> Option<Goal> {
        let wanted = normalize_label(label);
        Goal::ALL
            .into_iter()
            .find(|g| normalize_label(g.label()) == wanted)
    }

    /// Like [`Goal::from_label`], but unknown labels fall back to `Maintenance`.
    pub fn from_label_or_default(label: &str) -> Goal {
        Goal::from_label(label).unwrap_or_else(|| {
            warn!(goal = label, "Unrecognized goal, using Maintenance");
            Goal::Maintenance
        })
    }
}

/// Diet preference; drives the meal suggestion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DietPreference {
    Vegetarian,
    NonVegetarian,
}

impl DietPreference {
    pub const ALL: [DietPreference; 2] = [DietPreference::Vegetarian, DietPreference::NonVegetarian];

    pub fn label(self) -> &'static str {
        match self {
            DietPreference::Vegetarian => "Vegetarian",
            DietPreference::NonVegetarian => "Non-Vegetarian",
        }
    }

    /// Anything that is not "vegetarian" is treated as non-vegetarian.
    pub fn from_label(label: &str) -> DietPreference {
        if normalize_label(label) == "vegetarian" {
            DietPreference::Vegetarian
        } else {
            DietPreference::NonVegetarian
        }
    }
}

fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(*c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A validated user profile. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub goal: Goal,
    pub diet: DietPreference,
}

impl UserProfile {
    /// Build a profile, rejecting non-finite measurements.
    pub fn new(
        age: u32,
        height_cm: f64,
        weight_kg: f64,
        goal: Goal,
        diet: DietPreference,
    ) -> Result<Self> {
        let profile = Self {
            age,
            height_cm,
            weight_kg,
            goal,
            diet,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Fields are public, so anything handed to the calculator is re-checked here.
    pub fn validate(&self) -> Result<()> {
        if !self.height_cm.is_finite() {
            return Err(CoachError::InvalidInput(format!(
                "height must be a number, got {}",
                self.height_cm
            )));
        }
        if !self.weight_kg.is_finite() {
            return Err(CoachError::InvalidInput(format!(
                "weight must be a number, got {}",
                self.weight_kg
            )));
        }
        Ok(())
    }

    /// The raw wire form of this profile.
    pub fn to_form(&self) -> ProfileForm {
        ProfileForm {
            age: self.age.to_string(),
            height: self.height_cm.to_string(),
            weight: self.weight_kg.to_string(),
            goal: self.goal.label().to_string(),
            diet: self.diet.label().to_string(),
        }
    }
}

/// The five wizard answers exactly as typed, and the request body of the proxy endpoint.
///
/// Browser clients may send the numeric answers as JSON numbers or strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileForm {
    #[serde(default, deserialize_with = "string_or_number")]
    pub age: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub height: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub weight: String,

    #[serde(default)]
    pub goal: String,

    #[serde(default)]
    pub diet: String,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

impl ProfileForm {
    /// Parse every field, failing on the first missing or non-numeric value.
    pub fn into_profile(self) -> Result<UserProfile> {
        let age = parse_age(&self.age)?;
        let height_cm = parse_measurement("height", &self.height)?;
        let weight_kg = parse_measurement("weight", &self.weight)?;
        let goal = Goal::from_label_or_default(required("goal", &self.goal)?);
        let diet = DietPreference::from_label(required("diet", &self.diet)?);

        UserProfile::new(age, height_cm, weight_kg, goal, diet)
    }
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoachError::InvalidInput(format!("{} is required", field)));
    }
    Ok(value)
}

/// Parse an age in whole years.
pub fn parse_age(value: &str) -> Result<u32> {
    let value = required("age", value)?;
    value
        .parse()
        .map_err(|_| CoachError::InvalidInput(format!("age must be a whole number, got '{}'", value)))
}

/// Parse a height or weight as a finite number.
pub fn parse_measurement(field: &str, value: &str) -> Result<f64> {
    let value = required(field, value)?;
    let parsed: f64 = value
        .parse()
        .map_err(|_| CoachError::InvalidInput(format!("{} must be a number, got '{}'", field, value)))?;

    if !parsed.is_finite() {
        return Err(CoachError::InvalidInput(format!(
            "{} must be a number, got '{}'",
            field, value
        )));
    }
    Ok(parsed)
}
