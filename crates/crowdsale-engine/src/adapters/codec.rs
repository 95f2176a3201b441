//! Bincode codec for sale records.

use crate::domain::entities::Crowdsale;
use crate::domain::errors::CodecError;
use crate::ports::outbound::RecordCodec;

/// Bincode encoding of [`Crowdsale`] records.
///
/// Records are rewritten in place on status changes, and bincode's fixed
/// integer layout keeps the encoded size constant for the struct shape, so
/// the reservation computed at creation holds for the record's whole life.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeRecordCodec;

impl RecordCodec for BincodeRecordCodec {
    fn encode(&self, sale: &Crowdsale) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(sale).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Crowdsale, CodecError> {
        bincode::deserialize(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}
