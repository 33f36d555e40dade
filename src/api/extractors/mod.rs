mod valid_json;

pub use valid_json::ValidJson;
