//! Named, domain-tagged attribute columns.
//!
//! An [`AttributeStore`] belongs to one geometry component. It does not know
//! the component's element counts, so length checks happen in
//! [`AttributeStore::insert_checked`] against a size supplied by the owner.

use std::collections::BTreeMap;

use glam::{Vec2, Vec3, Vec4};

use crate::conversions;
use crate::domain::AttributeDomain;
use crate::error::AttributeError;
use crate::value::{AttributeScalar, AttributeType, AttributeValue};

/// Owned column of attribute values.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeData {
    /// Boolean column.
    Bool(Vec<bool>),
    /// Integer column.
    Int(Vec<i32>),
    /// Float column.
    Float(Vec<f32>),
    /// 2D vector column.
    Float2(Vec<Vec2>),
    /// 3D vector column.
    Float3(Vec<Vec3>),
    /// Color column.
    Color(Vec<Vec4>),
}

/// Borrowed column of attribute values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeSlice<'a> {
    /// Boolean column.
    Bool(&'a [bool]),
    /// Integer column.
    Int(&'a [i32]),
    /// Float column.
    Float(&'a [f32]),
    /// 2D vector column.
    Float2(&'a [Vec2]),
    /// 3D vector column.
    Float3(&'a [Vec3]),
    /// Color column.
    Color(&'a [Vec4]),
}

macro_rules! each_variant {
    ($enum:ident, $data:expr, $v:ident => $body:expr) => {
        match $data {
            $enum::Bool($v) => $body,
            $enum::Int($v) => $body,
            $enum::Float($v) => $body,
            $enum::Float2($v) => $body,
            $enum::Float3($v) => $body,
            $enum::Color($v) => $body,
        }
    };
}

macro_rules! map_variant {
    ($from:ident => $to:ident, $data:expr, $v:ident => $body:expr) => {
        match $data {
            $from::Bool($v) => $to::Bool($body),
            $from::Int($v) => $to::Int($body),
            $from::Float($v) => $to::Float($body),
            $from::Float2($v) => $to::Float2($body),
            $from::Float3($v) => $to::Float3($body),
            $from::Color($v) => $to::Color($body),
        }
    };
}

/// Averaging used when several source elements map to one target element.
trait Mix: Copy + Default {
    fn mix(values: &[Self], group: &[u32]) -> Self;
}

macro_rules! impl_mix_float {
    ($($ty:ty),*) => {
        $(
            impl Mix for $ty {
                fn mix(values: &[Self], group: &[u32]) -> Self {
                    if group.is_empty() {
                        return Self::default();
                    }
                    let sum: $ty = group.iter().map(|&i| values[i as usize]).sum();
                    sum / group.len() as f32
                }
            }
        )*
    };
}

impl_mix_float!(f32, Vec2, Vec3, Vec4);

impl Mix for i32 {
    fn mix(values: &[Self], group: &[u32]) -> Self {
        if group.is_empty() {
            return 0;
        }
        let sum: i64 = group.iter().map(|&i| values[i as usize] as i64).sum();
        (sum as f64 / group.len() as f64).round() as i32
    }
}

impl Mix for bool {
    fn mix(values: &[Self], group: &[u32]) -> Self {
        group.iter().any(|&i| values[i as usize])
    }
}

fn gather<T: Copy>(values: &[T], indices: &[u32]) -> Vec<T> {
    indices.iter().map(|&i| values[i as usize]).collect()
}

fn mix_groups<T: Mix>(values: &[T], groups: &[Vec<u32>]) -> Vec<T> {
    groups.iter().map(|g| T::mix(values, g)).collect()
}

fn collect_as<T: AttributeScalar>(values: impl Iterator<Item = AttributeValue>) -> Vec<T> {
    values.map(conversions::convert_to::<T>).collect()
}

impl AttributeData {
    /// Creates a column of `len` zero values.
    pub fn new(data_type: AttributeType, len: usize) -> Self {
        Self::filled(AttributeValue::zero(data_type), len)
    }

    /// Creates a column of `len` copies of `value`.
    pub fn filled(value: AttributeValue, len: usize) -> Self {
        match value {
            AttributeValue::Bool(v) => AttributeData::Bool(vec![v; len]),
            AttributeValue::Int(v) => AttributeData::Int(vec![v; len]),
            AttributeValue::Float(v) => AttributeData::Float(vec![v; len]),
            AttributeValue::Float2(v) => AttributeData::Float2(vec![v; len]),
            AttributeValue::Float3(v) => AttributeData::Float3(vec![v; len]),
            AttributeValue::Color(v) => AttributeData::Color(vec![v; len]),
        }
    }

    /// Builds a column of `data_type`, converting each value.
    pub fn from_values(
        data_type: AttributeType,
        values: impl Iterator<Item = AttributeValue>,
    ) -> Self {
        match data_type {
            AttributeType::Bool => AttributeData::Bool(collect_as(values)),
            AttributeType::Int => AttributeData::Int(collect_as(values)),
            AttributeType::Float => AttributeData::Float(collect_as(values)),
            AttributeType::Float2 => AttributeData::Float2(collect_as(values)),
            AttributeType::Float3 => AttributeData::Float3(collect_as(values)),
            AttributeType::Color => AttributeData::Color(collect_as(values)),
        }
    }

    /// Returns the element type.
    pub fn data_type(&self) -> AttributeType {
        self.as_slice().data_type()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        each_variant!(AttributeData, self, v => v.len())
    }

    /// Returns true if the column has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets a single element.
    pub fn get(&self, index: usize) -> Option<AttributeValue> {
        self.as_slice().get(index)
    }

    /// Borrows the column.
    pub fn as_slice(&self) -> AttributeSlice<'_> {
        map_variant!(AttributeData => AttributeSlice, self, v => v.as_slice())
    }

    /// Returns a copy converted to `data_type`.
    pub fn convert(&self, data_type: AttributeType) -> AttributeData {
        self.as_slice().convert(data_type)
    }

    /// See [`AttributeSlice::gather`].
    pub fn gather(&self, indices: &[u32]) -> AttributeData {
        self.as_slice().gather(indices)
    }

    /// See [`AttributeSlice::mix_groups`].
    pub fn mix_groups(&self, groups: &[Vec<u32>]) -> AttributeData {
        self.as_slice().mix_groups(groups)
    }
}

impl<'a> AttributeSlice<'a> {
    /// Returns the element type.
    pub fn data_type(&self) -> AttributeType {
        match self {
            AttributeSlice::Bool(_) => AttributeType::Bool,
            AttributeSlice::Int(_) => AttributeType::Int,
            AttributeSlice::Float(_) => AttributeType::Float,
            AttributeSlice::Float2(_) => AttributeType::Float2,
            AttributeSlice::Float3(_) => AttributeType::Float3,
            AttributeSlice::Color(_) => AttributeType::Color,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        each_variant!(AttributeSlice, self, v => v.len())
    }

    /// Returns true if the column has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets a single element.
    pub fn get(&self, index: usize) -> Option<AttributeValue> {
        each_variant!(AttributeSlice, self, v => v.get(index).map(|x| x.into_value()))
    }

    /// Copies the column.
    pub fn to_data(&self) -> AttributeData {
        map_variant!(AttributeSlice => AttributeData, self, v => v.to_vec())
    }

    /// Copies the column, converting to `data_type`.
    pub fn convert(&self, data_type: AttributeType) -> AttributeData {
        if self.data_type() == data_type {
            return self.to_data();
        }
        AttributeData::from_values(data_type, (0..self.len()).filter_map(|i| self.get(i)))
    }

    /// Builds a new column where element `i` is `self[indices[i]]`.
    ///
    /// Panics if an index is out of range.
    pub fn gather(&self, indices: &[u32]) -> AttributeData {
        map_variant!(AttributeSlice => AttributeData, self, v => gather(v, indices))
    }

    /// Builds a new column where element `i` averages `self` over `groups[i]`.
    ///
    /// Numbers and vectors use the arithmetic mean (integers rounded), booleans
    /// are true if any member is true. Empty groups give the zero value.
    pub fn mix_groups(&self, groups: &[Vec<u32>]) -> AttributeData {
        map_variant!(AttributeSlice => AttributeData, self, v => mix_groups(v, groups))
    }
}

/// An owned attribute column tagged with its domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Domain the values are indexed by.
    pub domain: AttributeDomain,
    /// The values.
    pub data: AttributeData,
}

/// A borrowed attribute column tagged with its domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeRef<'a> {
    /// Domain the values are indexed by.
    pub domain: AttributeDomain,
    /// The values.
    pub data: AttributeSlice<'a>,
}

/// Domain and type of a stored attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeMetaData {
    /// Domain the values are indexed by.
    pub domain: AttributeDomain,
    /// Element type.
    pub data_type: AttributeType,
}

/// Named attribute columns of one geometry component.
///
/// Names are unique within the store; inserting an existing name replaces
/// the previous attribute regardless of its domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
    attributes: BTreeMap<String, Attribute>,
}

impl AttributeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns true if an attribute with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Borrows an attribute.
    pub fn get(&self, name: &str) -> Option<AttributeRef<'_>> {
        self.attributes.get(name).map(|a| AttributeRef {
            domain: a.domain,
            data: a.data.as_slice(),
        })
    }

    /// Mutably borrows an attribute.
    ///
    /// Callers must keep the column length unchanged.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes.get_mut(name)
    }

    /// Returns the domain and type of an attribute.
    pub fn meta_data(&self, name: &str) -> Option<AttributeMetaData> {
        self.attributes.get(name).map(|a| AttributeMetaData {
            domain: a.domain,
            data_type: a.data.data_type(),
        })
    }

    /// Inserts or replaces an attribute without checking its length.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        domain: AttributeDomain,
        data: AttributeData,
    ) -> Option<Attribute> {
        self.attributes.insert(name.into(), Attribute { domain, data })
    }

    /// Inserts or replaces an attribute after checking it against the
    /// element count of its domain.
    pub fn insert_checked(
        &mut self,
        name: impl Into<String>,
        domain: AttributeDomain,
        data: AttributeData,
        domain_size: usize,
    ) -> Result<Option<Attribute>, AttributeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(AttributeError::EmptyName);
        }
        if data.len() != domain_size {
            return Err(AttributeError::LengthMismatch {
                name,
                domain,
                len: data.len(),
                expected: domain_size,
            });
        }
        Ok(self.insert(name, domain, data))
    }

    /// Removes an attribute.
    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        self.attributes.remove(name)
    }

    /// Iterates over attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Checks every attribute against the element count of its domain.
    pub fn validate(
        &self,
        domain_size: impl Fn(AttributeDomain) -> usize,
    ) -> Result<(), AttributeError> {
        for (name, attribute) in &self.attributes {
            let expected = domain_size(attribute.domain);
            if attribute.data.len() != expected {
                return Err(AttributeError::LengthMismatch {
                    name: name.clone(),
                    domain: attribute.domain,
                    len: attribute.data.len(),
                    expected,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut store = AttributeStore::new();
        store.insert(
            "weight",
            AttributeDomain::Point,
            AttributeData::Float(vec![0.0, 0.5, 1.0]),
        );

        let attr = store.get("weight").unwrap();
        assert_eq!(attr.domain, AttributeDomain::Point);
        assert_eq!(attr.data.len(), 3);
        assert_eq!(attr.data.get(1), Some(AttributeValue::Float(0.5)));

        let meta = store.meta_data("weight").unwrap();
        assert_eq!(meta.data_type, AttributeType::Float);
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_insert_replaces_across_domains() {
        let mut store = AttributeStore::new();
        store.insert("a", AttributeDomain::Point, AttributeData::Int(vec![1]));
        let old = store.insert("a", AttributeDomain::Face, AttributeData::Bool(vec![true, false]));
        assert_eq!(old.unwrap().domain, AttributeDomain::Point);
        assert_eq!(store.len(), 1);
        assert_eq!(store.meta_data("a").unwrap().domain, AttributeDomain::Face);
    }

    #[test]
    fn test_insert_checked() {
        let mut store = AttributeStore::new();
        let err = store
            .insert_checked("a", AttributeDomain::Edge, AttributeData::Int(vec![1, 2]), 3)
            .unwrap_err();
        assert!(matches!(err, AttributeError::LengthMismatch { len: 2, expected: 3, .. }));

        let err = store
            .insert_checked("", AttributeDomain::Edge, AttributeData::Int(vec![]), 0)
            .unwrap_err();
        assert_eq!(err, AttributeError::EmptyName);

        assert!(
            store
                .insert_checked("a", AttributeDomain::Edge, AttributeData::Int(vec![1, 2, 3]), 3)
                .is_ok()
        );
    }

    #[test]
    fn test_validate() {
        let mut store = AttributeStore::new();
        store.insert("p", AttributeDomain::Point, AttributeData::new(AttributeType::Float3, 4));
        store.insert("f", AttributeDomain::Face, AttributeData::new(AttributeType::Int, 2));

        assert!(
            store
                .validate(|d| match d {
                    AttributeDomain::Point => 4,
                    AttributeDomain::Face => 2,
                    _ => 0,
                })
                .is_ok()
        );
        assert!(store.validate(|_| 4).is_err());
    }

    #[test]
    fn test_gather() {
        let data = AttributeData::Float(vec![10.0, 20.0, 30.0]);
        let gathered = data.gather(&[2, 0, 0, 1]);
        assert_eq!(gathered, AttributeData::Float(vec![30.0, 10.0, 10.0, 20.0]));
    }

    #[test]
    fn test_mix_groups() {
        let data = AttributeData::Float3(vec![Vec3::ZERO, Vec3::splat(2.0), Vec3::X]);
        let mixed = data.mix_groups(&[vec![0, 1], vec![2], vec![]]);
        assert_eq!(
            mixed,
            AttributeData::Float3(vec![Vec3::ONE, Vec3::X, Vec3::ZERO])
        );

        let ints = AttributeData::Int(vec![1, 2]);
        assert_eq!(ints.mix_groups(&[vec![0, 1]]), AttributeData::Int(vec![2]));

        let bools = AttributeData::Bool(vec![false, true, false]);
        assert_eq!(
            bools.mix_groups(&[vec![0, 1], vec![0, 2]]),
            AttributeData::Bool(vec![true, false])
        );
    }

    #[test]
    fn test_convert_column() {
        let data = AttributeData::Int(vec![0, 3]);
        assert_eq!(
            data.convert(AttributeType::Float),
            AttributeData::Float(vec![0.0, 3.0])
        );
        assert_eq!(
            data.convert(AttributeType::Bool),
            AttributeData::Bool(vec![false, true])
        );
    }
}
