use crate::{Result, TicTacError};
use serde::{de::DeserializeOwned, Serialize};

/// Strategy for turning stored values into bytes and back.
///
/// The store is generic over its codec so the serialization format can be
/// swapped without touching the backends or the engine.
pub trait Codec: Send + Sync {
    /// Serialize a value to bytes
    fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized;

    /// Deserialize bytes to a value
    fn decode<T>(&self, bytes: &[u8]) -> Result<T>
    where
        T: DeserializeOwned;
}

/// JSON codec, the default textual format
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_vec(value)
            .map_err(|e| TicTacError::serialization(format!("JSON serialization failed: {}", e)))
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(bytes)
            .map_err(|e| TicTacError::serialization(format!("JSON deserialization failed: {}", e)))
    }
}

/// Compact binary codec using bincode
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryCodec;

impl Codec for BinaryCodec {
    fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        bincode::serialize(value)
            .map_err(|e| TicTacError::serialization(format!("Binary serialization failed: {}", e)))
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        bincode::deserialize(bytes)
            .map_err(|e| TicTacError::serialization(format!("Binary deserialization failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{initial_history, Board, Mark, Square};

    fn sample_history() -> Vec<Board> {
        let mut history = initial_history();
        history.push(Board::empty().with_mark(Square::new(4).unwrap(), Mark::X));
        history
    }

    #[test]
    fn test_json_history_format() {
        let codec = JsonCodec;
        let bytes = codec.encode(&sample_history()).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("[[null,null,null,null,null,null,null,null,null],"));
        assert!(text.contains(r#""X""#));

        let decoded: Vec<Board> = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, sample_history());
    }

    #[test]
    fn test_binary_round_trip() {
        let codec = BinaryCodec;
        let bytes = codec.encode(&(sample_history(), 1usize)).unwrap();
        let (history, cursor): (Vec<Board>, usize) = codec.decode(&bytes).unwrap();
        assert_eq!(history, sample_history());
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_decode_garbage_is_serialization_error() {
        let result: Result<Vec<Board>> = JsonCodec.decode(b"{not json");
        assert!(matches!(result, Err(TicTacError::Serialization { .. })));

        let result: Result<usize> = JsonCodec.decode(b"\"seven\"");
        assert!(result.is_err());
    }
}
