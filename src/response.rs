//! Success envelopes: a single named key holding the payload, e.g. `{"articles": [...]}`.

use axum::{http::StatusCode, Json};
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug)]
pub struct Keyed<T> {
    pub key: &'static str,
    pub value: T,
}

impl<T: Serialize> Serialize for Keyed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.value)?;
        map.end()
    }
}

pub fn ok<T: Serialize>(key: &'static str, value: T) -> (StatusCode, Json<Keyed<T>>) {
    (StatusCode::OK, Json(Keyed { key, value }))
}

pub fn created<T: Serialize>(key: &'static str, value: T) -> (StatusCode, Json<Keyed<T>>) {
    (StatusCode::CREATED, Json(Keyed { key, value }))
}
