use serde::Deserialize;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListBookingsQuery {
    pub status: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ReferenceQuery {
    pub reference: Option<String>,
}
