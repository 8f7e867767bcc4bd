use serde_json::{Value, json};

const RECOMMEND_TEMPLATE: &str = "Based on the following mood/vibe: \"{mood}\", suggest a unique, non-alcoholic drink. Provide a creative name for the drink and a short, uplifting quote related to the mood.";

const IMAGE_TEMPLATE: &str = "A beautifully styled, vibrant, professional photograph of a \"{name}\". The drink is in a stylish glass on a clean, minimalist background. The lighting is soft and inviting, highlighting the drink's colors and textures. High resolution, aesthetic, photorealistic, cinematic.";

const DRINK_NAME_DESCRIPTION: &str = "A creative and appealing name for the beverage.";
const QUOTE_DESCRIPTION: &str = "An uplifting or fitting quote that matches the mood.";

/// Prompt asking the text model for a drink concept.
pub fn build_recommendation_prompt(mood: &str) -> String {
    RECOMMEND_TEMPLATE.replace("{mood}", mood)
}

/// Prompt asking the image model for a photo of the named drink.
pub fn build_image_prompt(drink_name: &str) -> String {
    IMAGE_TEMPLATE.replace("{name}", drink_name)
}

/// Structured-output schema: `{ drinkName: string, quote: string }`, both required.
pub fn recommendation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "drinkName": {
                "type": "STRING",
                "description": DRINK_NAME_DESCRIPTION,
            },
            "quote": {
                "type": "STRING",
                "description": QUOTE_DESCRIPTION,
            },
        },
        "required": ["drinkName", "quote"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_prompt_quotes_mood() {
        let prompt = build_recommendation_prompt("sleepy, Cozy");
        assert!(prompt.starts_with("Based on the following mood/vibe: \"sleepy, Cozy\""));
        assert!(prompt.contains("non-alcoholic"));
    }

    #[test]
    fn image_prompt_quotes_name() {
        let prompt = build_image_prompt("Velvet Dusk Latte");
        assert!(prompt.contains("photograph of a \"Velvet Dusk Latte\"."));
        assert!(prompt.ends_with("cinematic."));
    }

    #[test]
    fn schema_requires_both_fields() {
        let schema = recommendation_schema();
        assert_eq!(schema["required"], json!(["drinkName", "quote"]));
        assert_eq!(schema["properties"]["drinkName"]["type"], "STRING");
        assert_eq!(schema["properties"]["quote"]["type"], "STRING");
    }
}
