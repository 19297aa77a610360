use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Assistant,
    System,
    Agent,
}

impl ToString for Role {
    fn to_string(&self) -> String {
        match self {
            Role::Client => return String::from("You"),
            Role::Assistant => return String::from("Xceed AI"),
            Role::System => return String::from("Xceed"),
            Role::Agent => return String::from("Agent"),
        }
    }
}
