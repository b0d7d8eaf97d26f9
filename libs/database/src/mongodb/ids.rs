use mongodb::bson::{Binary, Bson, spec::BinarySubtype};
use uuid::Uuid;

/// Filter value matching a `Uuid` field as the driver stores it.
///
/// Documents are written through the raw (non human-readable) serializer,
/// where a `Uuid` becomes generic binary. `to_bson` would produce a string
/// and never match.
pub fn uuid_to_bson(id: Uuid) -> Bson {
    Bson::Binary(Binary {
        subtype: BinarySubtype::Generic,
        bytes: id.as_bytes().to_vec(),
    })
}
