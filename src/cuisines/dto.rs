use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NewCuisine {
    pub name: String,
}

/// `{"cuisine": {...}}`
#[derive(Debug, Deserialize)]
pub struct CuisineWrapper {
    pub cuisine: NewCuisine,
}
