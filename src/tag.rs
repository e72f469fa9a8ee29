/// Type tags. The first byte of every encoded element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// End of object. Only ever seen as a document terminator.
    Eoo,
    Double,
    String,
    Object,
    Array,
    Binary,
    Undefined,
    ObjectId,
    Bool,
    Date,
    Null,
    Regex,
    DbRef,
    Code,
    Symbol,
    CodeWScope,
    Int32,
    Timestamp,
    Int64,
    MaxKey,
    MinKey,
}

impl TypeTag {
    /// Every tag, in byte order.
    pub const ALL: [TypeTag; 21] = [
        TypeTag::Eoo,
        TypeTag::Double,
        TypeTag::String,
        TypeTag::Object,
        TypeTag::Array,
        TypeTag::Binary,
        TypeTag::Undefined,
        TypeTag::ObjectId,
        TypeTag::Bool,
        TypeTag::Date,
        TypeTag::Null,
        TypeTag::Regex,
        TypeTag::DbRef,
        TypeTag::Code,
        TypeTag::Symbol,
        TypeTag::CodeWScope,
        TypeTag::Int32,
        TypeTag::Timestamp,
        TypeTag::Int64,
        TypeTag::MaxKey,
        TypeTag::MinKey,
    ];

    /// Construct a tag from a single byte. Returns `None` if the byte isn't a recognized tag.
    pub fn from_u8(n: u8) -> Option<TypeTag> {
        use self::TypeTag::*;
        Some(match n {
            0x00 => Eoo,
            0x01 => Double,
            0x02 => String,
            0x03 => Object,
            0x04 => Array,
            0x05 => Binary,
            0x06 => Undefined,
            0x07 => ObjectId,
            0x08 => Bool,
            0x09 => Date,
            0x0a => Null,
            0x0b => Regex,
            0x0c => DbRef,
            0x0d => Code,
            0x0e => Symbol,
            0x0f => CodeWScope,
            0x10 => Int32,
            0x11 => Timestamp,
            0x12 => Int64,
            0x7f => MaxKey,
            0xff => MinKey,
            _ => return None,
        })
    }

    /// Converts a tag into its single-byte representation.
    pub fn into_u8(self) -> u8 {
        use self::TypeTag::*;
        match self {
            Eoo => 0x00,
            Double => 0x01,
            String => 0x02,
            Object => 0x03,
            Array => 0x04,
            Binary => 0x05,
            Undefined => 0x06,
            ObjectId => 0x07,
            Bool => 0x08,
            Date => 0x09,
            Null => 0x0a,
            Regex => 0x0b,
            DbRef => 0x0c,
            Code => 0x0d,
            Symbol => 0x0e,
            CodeWScope => 0x0f,
            Int32 => 0x10,
            Timestamp => 0x11,
            Int64 => 0x12,
            MaxKey => 0x7f,
            MinKey => 0xff,
        }
    }

    pub fn name(&self) -> &'static str {
        use self::TypeTag::*;
        match self {
            Eoo => "EOO",
            Double => "Double",
            String => "String",
            Object => "Object",
            Array => "Array",
            Binary => "BinData",
            Undefined => "Undefined",
            ObjectId => "ObjectId",
            Bool => "Bool",
            Date => "Date",
            Null => "Null",
            Regex => "RegEx",
            DbRef => "DBRef",
            Code => "Code",
            Symbol => "Symbol",
            CodeWScope => "CodeWScope",
            Int32 => "NumberInt",
            Timestamp => "Timestamp",
            Int64 => "NumberLong",
            MaxKey => "MaxKey",
            MinKey => "MinKey",
        }
    }

    /// True for the three numeric kinds, which all share one slot in the canonical order.
    pub fn is_number(&self) -> bool {
        matches!(self, TypeTag::Double | TypeTag::Int32 | TypeTag::Int64)
    }
}

impl From<TypeTag> for u8 {
    fn from(val: TypeTag) -> u8 {
        val.into_u8()
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} (0x{:02x})", self.name(), self.into_u8())
    }
}

/// Binary payload subtypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinarySubtype {
    General,
    Function,
    BinaryOld,
    UuidOld,
    Uuid,
    Md5,
    UserDefined(u8),
    Reserved(u8),
}

impl BinarySubtype {
    pub fn from_u8(n: u8) -> BinarySubtype {
        match n {
            0x00 => BinarySubtype::General,
            0x01 => BinarySubtype::Function,
            0x02 => BinarySubtype::BinaryOld,
            0x03 => BinarySubtype::UuidOld,
            0x04 => BinarySubtype::Uuid,
            0x05 => BinarySubtype::Md5,
            0x80..=0xff => BinarySubtype::UserDefined(n),
            _ => BinarySubtype::Reserved(n),
        }
    }

    pub fn into_u8(self) -> u8 {
        match self {
            BinarySubtype::General => 0x00,
            BinarySubtype::Function => 0x01,
            BinarySubtype::BinaryOld => 0x02,
            BinarySubtype::UuidOld => 0x03,
            BinarySubtype::Uuid => 0x04,
            BinarySubtype::Md5 => 0x05,
            BinarySubtype::UserDefined(n) | BinarySubtype::Reserved(n) => n,
        }
    }
}

impl From<u8> for BinarySubtype {
    fn from(val: u8) -> BinarySubtype {
        BinarySubtype::from_u8(val)
    }
}

impl From<BinarySubtype> for u8 {
    fn from(val: BinarySubtype) -> u8 {
        val.into_u8()
    }
}
