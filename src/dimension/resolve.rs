//! Resolution of dimension-like keys to axis positions.
//!
//! A [`DimKey`] can be a tag, a name or a plain axis number. Lookup tries an
//! exact tag match first, then a (normalised) name match, and finally treats a
//! positional key as already resolved.

use itertools::Itertools;
use log::trace;

use super::Dimension;
use crate::{
    core::{DimTag, Name},
    errors::{DimError, Result},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DimKey {
    Tag(DimTag),
    Name(Name),
    Pos(usize),
}

impl DimKey {
    fn describe(&self) -> String {
        match self {
            DimKey::Tag(tag) => tag.name().to_string(),
            DimKey::Name(name) => name.to_string(),
            DimKey::Pos(axis) => format!("axis {}", axis),
        }
    }
}

impl From<DimTag> for DimKey {
    fn from(tag: DimTag) -> Self {
        DimKey::Tag(tag)
    }
}

impl From<&DimTag> for DimKey {
    fn from(tag: &DimTag) -> Self {
        DimKey::Tag(tag.clone())
    }
}

impl From<&Dimension> for DimKey {
    fn from(dim: &Dimension) -> Self {
        DimKey::Tag(dim.tag().clone())
    }
}

impl From<&str> for DimKey {
    fn from(name: &str) -> Self {
        DimKey::Name(Name::new(name))
    }
}

impl From<String> for DimKey {
    fn from(name: String) -> Self {
        DimKey::Name(Name::new(&name))
    }
}

impl From<usize> for DimKey {
    fn from(axis: usize) -> Self {
        DimKey::Pos(axis)
    }
}

/// Axis position of `key` within `dims`.
pub fn dimnum(dims: &[Dimension], key: &DimKey) -> Result<usize> {
    let found = match key {
        DimKey::Tag(tag) => dims
            .iter()
            .position(|dim| dim.tag() == tag)
            .or_else(|| dims.iter().position(|dim| dim.name() == tag.name())),
        DimKey::Name(name) => dims.iter().position(|dim| dim.name() == name.as_str()),
        DimKey::Pos(axis) => {
            if *axis < dims.len() {
                Some(*axis)
            } else {
                return Err(DimError::AxisOutOfRange {
                    axis: *axis,
                    ndim: dims.len(),
                });
            }
        }
    };
    trace!("resolved {:?} to {:?}", key, found);
    found.ok_or_else(|| DimError::DimensionNotFound {
        requested: key.describe(),
        available: dims.iter().map(Dimension::name).join(", "),
    })
}

/// Axis positions of `keys`, in the order requested.
///
/// Two keys that land on the same axis make the request ambiguous and are
/// rejected.
pub fn dimnums(dims: &[Dimension], keys: &[DimKey]) -> Result<Vec<usize>> {
    let axes = keys
        .iter()
        .map(|key| dimnum(dims, key))
        .collect::<Result<Vec<_>>>()?;
    if let Some(axis) = axes.iter().duplicates().next() {
        return Err(DimError::DuplicateDimension(dims[*axis].name().to_string()));
    }
    Ok(axes)
}

pub fn hasdim(dims: &[Dimension], key: &DimKey) -> bool {
    dimnum(dims, key).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy() -> Vec<Dimension> {
        vec![
            Dimension::with_len(DimTag::X, 2),
            Dimension::with_len(DimTag::Y, 3),
        ]
    }

    #[test]
    fn test_resolve_by_tag_name_and_position() {
        let dims = xy();
        assert_eq!(dimnum(&dims, &DimTag::Y.into()).unwrap(), 1);
        assert_eq!(dimnum(&dims, &"X".into()).unwrap(), 0);
        assert_eq!(dimnum(&dims, &1usize.into()).unwrap(), 1);
        assert_eq!(dimnum(&dims, &(&dims[1]).into()).unwrap(), 1);
    }

    #[test]
    fn test_missing_dimension() {
        let err = dimnum(&xy(), &DimTag::Z.into()).unwrap_err();
        match err {
            DimError::DimensionNotFound {
                requested,
                available,
            } => {
                assert_eq!(requested, "Z");
                assert_eq!(available, "X, Y");
            }
            other => panic!("expected DimensionNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_position_out_of_range() {
        assert!(matches!(
            dimnum(&xy(), &DimKey::Pos(2)),
            Err(DimError::AxisOutOfRange { axis: 2, ndim: 2 })
        ));
    }

    #[test]
    fn test_dimnums_preserve_request_order() {
        let dims = xy();
        let keys = [DimKey::from(DimTag::Y), DimKey::from(DimTag::X)];
        assert_eq!(dimnums(&dims, &keys).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_dimnums_reject_duplicates() {
        let dims = xy();
        let keys = [DimKey::from(DimTag::X), DimKey::from(0usize)];
        assert!(matches!(
            dimnums(&dims, &keys),
            Err(DimError::DuplicateDimension(name)) if name == "X"
        ));
    }

    #[test]
    fn test_hasdim() {
        assert!(hasdim(&xy(), &"Y".into()));
        assert!(!hasdim(&xy(), &"Ti".into()));
    }
}
