use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;

/// A drink row. The recipe column holds a JSON array of ingredient objects
/// (`{name, color, parts}`) serialized as text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: String,
}

impl Drink {
    fn recipe_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.recipe)
    }

    /// Full representation, permission-gated.
    pub fn long(&self) -> Result<Value, serde_json::Error> {
        Ok(json!({
            "id": self.id,
            "title": self.title,
            "recipe": self.recipe_value()?,
        }))
    }

    /// Public representation: ingredient names are omitted, only color and
    /// proportions remain.
    pub fn short(&self) -> Result<Value, serde_json::Error> {
        let recipe = self.recipe_value()?;
        let parts: Vec<Value> = recipe
            .as_array()
            .map(|ingredients| {
                ingredients
                    .iter()
                    .map(|ingredient| {
                        json!({
                            "color": ingredient.get("color").cloned().unwrap_or(Value::Null),
                            "parts": ingredient.get("parts").cloned().unwrap_or(Value::Null),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(json!({
            "id": self.id,
            "title": self.title,
            "recipe": parts,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drink() -> Drink {
        Drink {
            id: 1,
            title: "Water".into(),
            recipe: r#"[{"name": "water", "color": "blue", "parts": 1}]"#.into(),
        }
    }

    #[test]
    fn short_view_drops_ingredient_names() {
        let short = drink().short().unwrap();
        let ingredient = &short["recipe"][0];
        assert!(ingredient.get("name").is_none());
        assert_eq!(ingredient["color"], "blue");
        assert_eq!(ingredient["parts"], 1);
    }

    #[test]
    fn long_view_keeps_the_full_recipe() {
        let long = drink().long().unwrap();
        assert_eq!(long["recipe"][0]["name"], "water");
    }
}
