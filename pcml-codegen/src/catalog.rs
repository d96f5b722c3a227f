//! Scalar type catalog.
//!
//! Maps the closed set of PCML data types to the Rust types of generated
//! fields and to the way those fields are initialized.

/// How a scalar field's initial value is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultPolicy {
    /// Ordinary default construction.
    DefaultConstruct,
    /// Explicit zero value; the representation type has no usable default.
    Zero,
}

/// Scalar representation of a PCML data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Character data.
    Char,
    /// 1-byte signed integer.
    Int8,
    /// 1-byte unsigned integer.
    UInt8,
    /// 2-byte signed integer.
    Int16,
    /// 2-byte unsigned integer.
    UInt16,
    /// 4-byte signed integer.
    Int32,
    /// 4-byte unsigned integer.
    UInt32,
    /// 8-byte signed integer.
    Int64,
    /// 8-byte unsigned integer.
    UInt64,
    /// 4-byte floating point.
    Float32,
    /// 8-byte floating point.
    Float64,
    /// Packed decimal.
    Packed,
    /// Zoned decimal.
    Zoned,
    /// Raw bytes.
    Byte,
    /// Date in character form.
    Date,
    /// Time in character form.
    Time,
    /// Timestamp in character form.
    Timestamp,
}

impl ScalarType {
    /// Returns the Rust type name of a field of this type.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::Char | Self::Date | Self::Time | Self::Timestamp => "String",
            Self::Int8 => "i8",
            Self::UInt8 => "u8",
            Self::Int16 => "i16",
            Self::UInt16 => "u16",
            Self::Int32 => "i32",
            Self::UInt32 => "u32",
            Self::Int64 => "i64",
            Self::UInt64 => "u64",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
            Self::Packed | Self::Zoned => "Decimal",
            Self::Byte => "Vec<u8>",
        }
    }

    /// Returns the PCML type name this scalar was resolved from.
    #[must_use]
    pub const fn pcml_name(&self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Int8
            | Self::UInt8
            | Self::Int16
            | Self::UInt16
            | Self::Int32
            | Self::UInt32
            | Self::Int64
            | Self::UInt64 => "int",
            Self::Float32 | Self::Float64 => "float",
            Self::Packed => "packed",
            Self::Zoned => "zoned",
            Self::Byte => "byte",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
        }
    }

    /// Returns how fields of this type are initialized.
    #[must_use]
    pub const fn default_policy(&self) -> DefaultPolicy {
        match self {
            Self::Packed | Self::Zoned => DefaultPolicy::Zero,
            _ => DefaultPolicy::DefaultConstruct,
        }
    }

    /// Returns true for decimal types.
    #[must_use]
    pub const fn is_decimal(&self) -> bool {
        matches!(self, Self::Packed | Self::Zoned)
    }
}

/// Catalog of the PCML scalar types.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeCatalog;

impl TypeCatalog {
    /// Creates the catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves a type name with default sizing.
    ///
    /// `string` is accepted as an alias of `char`.
    ///
    /// Returns `None` for names outside the catalog, including the struct
    /// marker.
    #[must_use]
    pub fn resolve(&self, type_name: &str) -> Option<ScalarType> {
        self.resolve_sized(type_name, 0, 0)
    }

    /// Resolves a type name, using length and precision to size numbers.
    ///
    /// `int` is 4 bytes unless `length` is 1, 2 or 8, and unsigned when
    /// `precision` equals the bit width. `float` is 8 bytes unless `length`
    /// is 4. A zero `length` or `precision` means unset.
    #[must_use]
    pub fn resolve_sized(&self, type_name: &str, length: u32, precision: u32) -> Option<ScalarType> {
        let scalar = match type_name {
            "char" | "string" => ScalarType::Char,
            "int" => match (length, precision) {
                (1, 8) => ScalarType::UInt8,
                (1, _) => ScalarType::Int8,
                (2, 16) => ScalarType::UInt16,
                (2, _) => ScalarType::Int16,
                (8, 64) => ScalarType::UInt64,
                (8, _) => ScalarType::Int64,
                (_, 32) => ScalarType::UInt32,
                _ => ScalarType::Int32,
            },
            "float" => match length {
                4 => ScalarType::Float32,
                _ => ScalarType::Float64,
            },
            "packed" => ScalarType::Packed,
            "zoned" => ScalarType::Zoned,
            "byte" => ScalarType::Byte,
            "date" => ScalarType::Date,
            "time" => ScalarType::Time,
            "timestamp" => ScalarType::Timestamp,
            _ => return None,
        };
        Some(scalar)
    }
}
