//! Payload encoding for values moved through the cache and the store.

use crate::error::AsideError;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<Vec<u8>, AsideError> {
  serde_json::to_vec(value).map_err(|source| AsideError::Encode {
    key: key.to_owned(),
    source,
  })
}

pub fn decode<T: DeserializeOwned>(key: &str, payload: &[u8]) -> Result<T, AsideError> {
  serde_json::from_slice(payload).map_err(|source| AsideError::Decode {
    key: key.to_owned(),
    source,
  })
}
