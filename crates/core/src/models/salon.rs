use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salon {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSalonsResponse {
    pub salons: Vec<Salon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSalonResponse {
    pub salon: Salon,
}
