//! The canonical cross-type order.
//!
//! Values of different types compare by the rank of their type first. Several tags share a rank:
//! the three numeric kinds, string and symbol, and undefined with end-of-object. [`CANONICAL_ORDER`]
//! lists the ranks in ascending order together with the minimum sentinel of each slot and the
//! rule for its maximum. Both the bound generator and the comparator read this one table, so a
//! new tag only needs to be placed here.

use crate::tag::TypeTag;

/// A synthetic value used as a scan bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sentinel {
    MinKey,
    MaxKey,
    Undefined,
    Null,
    /// The negative of the largest finite double.
    LowestDouble,
    /// The largest finite double.
    HighestDouble,
    EmptyString,
    EmptyObject,
    EmptyArray,
    /// Zero-length payload, generic subtype.
    EmptyBinary,
    ZeroObjectId,
    MaxObjectId,
    Bool(bool),
    /// Largest representable millisecond date.
    MaxDate,
    ZeroTimestamp,
    MaxTimestamp,
    /// Empty pattern, empty flags.
    EmptyRegex,
    /// Empty namespace, zero id.
    EmptyDbRef,
    EmptyCode,
    /// Empty code, empty scope.
    EmptyCodeWScope,
}

/// How the maximum of a slot is produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaxRule {
    /// A value of the slot's own type.
    Fixed(Sentinel),
    /// The minimum of the next slot in the table. Keeps the maximum of one type exactly equal to
    /// the minimum of the type after it.
    NextMin,
}

/// One slot of the canonical order.
#[derive(Clone, Copy, Debug)]
pub struct OrderSlot {
    pub rank: i32,
    /// Tags that have bounds in this slot.
    pub tags: &'static [TypeTag],
    /// Tags that compare at this rank but have no bounds of their own.
    pub rank_only: &'static [TypeTag],
    pub min: Sentinel,
    pub max: MaxRule,
}

const fn slot(
    rank: i32,
    tags: &'static [TypeTag],
    min: Sentinel,
    max: MaxRule,
) -> OrderSlot {
    OrderSlot {
        rank,
        tags,
        rank_only: &[],
        min,
        max,
    }
}

/// Every slot of the cross-type order, lowest first.
pub const CANONICAL_ORDER: [OrderSlot; 17] = [
    slot(-1, &[TypeTag::MinKey], Sentinel::MinKey, MaxRule::Fixed(Sentinel::MinKey)),
    OrderSlot {
        rank: 0,
        tags: &[TypeTag::Undefined],
        rank_only: &[TypeTag::Eoo],
        min: Sentinel::Undefined,
        max: MaxRule::Fixed(Sentinel::Undefined),
    },
    slot(5, &[TypeTag::Null], Sentinel::Null, MaxRule::Fixed(Sentinel::Null)),
    slot(
        10,
        &[TypeTag::Double, TypeTag::Int32, TypeTag::Int64],
        Sentinel::LowestDouble,
        MaxRule::Fixed(Sentinel::HighestDouble),
    ),
    slot(
        15,
        &[TypeTag::String, TypeTag::Symbol],
        Sentinel::EmptyString,
        MaxRule::NextMin,
    ),
    slot(20, &[TypeTag::Object], Sentinel::EmptyObject, MaxRule::NextMin),
    slot(25, &[TypeTag::Array], Sentinel::EmptyArray, MaxRule::NextMin),
    slot(30, &[TypeTag::Binary], Sentinel::EmptyBinary, MaxRule::NextMin),
    slot(
        35,
        &[TypeTag::ObjectId],
        Sentinel::ZeroObjectId,
        MaxRule::Fixed(Sentinel::MaxObjectId),
    ),
    slot(
        40,
        &[TypeTag::Bool],
        Sentinel::Bool(false),
        MaxRule::Fixed(Sentinel::Bool(true)),
    ),
    // Date lower bounds vary between index format versions, so the minimum drops one slot and
    // uses the largest boolean instead of the smallest date.
    slot(
        45,
        &[TypeTag::Date],
        Sentinel::Bool(true),
        MaxRule::Fixed(Sentinel::MaxDate),
    ),
    slot(
        47,
        &[TypeTag::Timestamp],
        Sentinel::ZeroTimestamp,
        MaxRule::Fixed(Sentinel::MaxTimestamp),
    ),
    slot(50, &[TypeTag::Regex], Sentinel::EmptyRegex, MaxRule::NextMin),
    slot(55, &[TypeTag::DbRef], Sentinel::EmptyDbRef, MaxRule::NextMin),
    slot(60, &[TypeTag::Code], Sentinel::EmptyCode, MaxRule::NextMin),
    // Moves if a new type is ever ranked between code-with-scope and max key.
    slot(
        65,
        &[TypeTag::CodeWScope],
        Sentinel::EmptyCodeWScope,
        MaxRule::NextMin,
    ),
    slot(127, &[TypeTag::MaxKey], Sentinel::MaxKey, MaxRule::Fixed(Sentinel::MaxKey)),
];

/// Index of the slot holding `tag`, counting rank-only members.
fn slot_index(tag: TypeTag) -> usize {
    CANONICAL_ORDER
        .iter()
        .position(|s| s.tags.contains(&tag) || s.rank_only.contains(&tag))
        .unwrap_or_else(|| unreachable!("{} is missing from the canonical order", tag.name()))
}

/// Rank of a tag in the cross-type order. Tags with equal rank compare by value.
pub fn canonical_rank(tag: TypeTag) -> i32 {
    CANONICAL_ORDER[slot_index(tag)].rank
}

/// The slot giving `tag` its bounds, or `None` if the tag has no bounds.
pub fn bounds_slot(tag: TypeTag) -> Option<&'static OrderSlot> {
    CANONICAL_ORDER.iter().find(|s| s.tags.contains(&tag))
}

/// The first tag of the slot after `tag`'s slot, or `None` at the top of the order.
pub fn successor(tag: TypeTag) -> Option<TypeTag> {
    CANONICAL_ORDER
        .get(slot_index(tag) + 1)
        .map(|s| s.tags[0])
}

/// The sentinel that is the minimum of `tag`.
pub fn min_sentinel(tag: TypeTag) -> Option<Sentinel> {
    bounds_slot(tag).map(|s| s.min)
}

/// The sentinel that is the maximum of `tag`, following the successor chain where the table
/// says to.
pub fn max_sentinel(tag: TypeTag) -> Option<Sentinel> {
    match bounds_slot(tag)?.max {
        MaxRule::Fixed(s) => Some(s),
        MaxRule::NextMin => min_sentinel(successor(tag)?),
    }
}
