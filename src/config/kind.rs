use crate::specification::KindDescriptor;
use crate::value;
use serde::{Deserialize, Serialize};

/// Codecs that can be assigned to a kind by name in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinCodec {
    /// Value-less kind
    Flag,
    String,
    Int,
    Float,
    IntOp,
    IntOpReduced,
    FloatOp,
    FloatOpReduced,
    UnixTimestamp,
    UtcDate,
    UnixTimestampOp,
    UnixTimestampOpReduced,
    UtcDateOp,
    UtcDateOpReduced,
}

impl BuiltinCodec {
    pub fn descriptor(self) -> KindDescriptor {
        let codec = match self {
            BuiltinCodec::Flag => return KindDescriptor::flag(),
            BuiltinCodec::String => value::string(),
            BuiltinCodec::Int => value::int(),
            BuiltinCodec::Float => value::float(),
            BuiltinCodec::IntOp => value::int_with_binary_op().codec(),
            BuiltinCodec::IntOpReduced => value::int_with_binary_op().reduced(),
            BuiltinCodec::FloatOp => value::float_with_binary_op().codec(),
            BuiltinCodec::FloatOpReduced => value::float_with_binary_op().reduced(),
            BuiltinCodec::UnixTimestamp => value::unix_timestamp(),
            BuiltinCodec::UtcDate => value::utc_date(),
            BuiltinCodec::UnixTimestampOp => value::unix_timestamp_with_binary_op().codec(),
            BuiltinCodec::UnixTimestampOpReduced => {
                value::unix_timestamp_with_binary_op().reduced()
            }
            BuiltinCodec::UtcDateOp => value::utc_date_with_binary_op().codec(),
            BuiltinCodec::UtcDateOpReduced => value::utc_date_with_binary_op().reduced(),
        };
        KindDescriptor::from(codec)
    }
}
