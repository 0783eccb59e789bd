use serde::{Deserialize, Serialize};

use crate::models::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

const SYSTEM_PROMPT: &str =
    "You are an expert fitness coach. Always respond with valid JSON only, no markdown formatting.";

/// The user prompt asking for a plan in the `PlanResult` wire shape.
pub fn plan_prompt(profile: &UserProfile) -> String {
    format!(
        r#"You are an expert fitness coach and nutritionist. Based on the following user data, create a personalized fitness plan:

User Profile:
- Age: {age} years
- Height: {height} cm
- Weight: {weight} kg
- Fitness Goal: {goal}
- Diet Preference: {diet}

Please provide a JSON response with the following structure (no markdown, just pure JSON):
{{
  "calories": <daily calorie target as number>,
  "protein": <daily protein in grams as number>,
  "carbs": <daily carbs in grams as number>,
  "fats": <daily fats in grams as number>,
  "dietPlan": [
    "<5 meal suggestions with emojis, each as a string>"
  ],
  "workoutSplit": [
    "<7 day workout schedule, each day as 'Day: Activity' format>"
  ],
  "tip": "<one motivational tip for their goal>"
}}

Calculate using Mifflin-St Jeor equation with 1.55 activity multiplier. Adjust calories based on goal (Fat Loss: -500, Muscle Building: +300, Strength: +200). Use 2g protein per kg bodyweight."#,
        age = profile.age,
        height = profile.height_cm,
        weight = profile.weight_kg,
        goal = profile.goal.label(),
        diet = profile.diet.label(),
    )
}

/// System and user messages for one plan request.
pub fn plan_messages(profile: &UserProfile) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(plan_prompt(profile)),
    ]
}
