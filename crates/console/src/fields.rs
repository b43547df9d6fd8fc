//! Editable, order-preserving form of `voice_settings.dynamic_fields`.
//!
//! The list tolerates anything while being edited: empty keys, blank
//! descriptions, duplicate keys. Only [`FieldList::project`] applies
//! policy:
//!
//! * an entry whose key is blank after trimming is dropped;
//! * the key is stored trimmed, the description verbatim;
//! * entries are inserted in list order, so when two entries share a
//!   trimmed key the later description wins at the earlier position.

use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicField {
    pub key: String,
    pub description: String,
}

impl DynamicField {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

/// Which half of a field an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAttr {
    Key,
    Description,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    fields: Vec<DynamicField>,
}

/// Result of flattening the list back into a mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    pub mapping: IndexMap<String, String>,
    /// Entries skipped because their key was blank.
    pub dropped_blank: usize,
    /// Entries whose key an earlier entry had already used.
    pub overwritten: usize,
}

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project a mapping into list form, in the mapping's iteration order.
    pub fn from_mapping(mapping: &IndexMap<String, String>) -> Self {
        Self {
            fields: mapping
                .iter()
                .map(|(k, v)| DynamicField::new(k.clone(), v.clone()))
                .collect(),
        }
    }

    pub fn as_slice(&self) -> &[DynamicField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DynamicField> {
        self.fields.get(index)
    }

    /// Append an empty entry and return its index.
    pub fn push_empty(&mut self) -> usize {
        self.fields.push(DynamicField::default());
        self.fields.len() - 1
    }

    /// Remove the entry at `index`. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<DynamicField> {
        (index < self.fields.len()).then(|| self.fields.remove(index))
    }

    /// Overwrite one attribute of the entry at `index`. Returns `false`
    /// (and changes nothing) when `index` is out of range.
    pub fn update(&mut self, index: usize, attr: FieldAttr, value: impl Into<String>) -> bool {
        let Some(field) = self.fields.get_mut(index) else {
            return false;
        };
        match attr {
            FieldAttr::Key => field.key = value.into(),
            FieldAttr::Description => field.description = value.into(),
        }
        true
    }

    pub fn project(&self) -> Projection {
        let mut out = Projection::default();
        for field in &self.fields {
            let key = field.key.trim();
            if key.is_empty() {
                out.dropped_blank += 1;
                continue;
            }
            if out
                .mapping
                .insert(key.to_owned(), field.description.clone())
                .is_some()
            {
                out.overwritten += 1;
            }
        }
        out
    }

    pub fn to_mapping(&self) -> IndexMap<String, String> {
        self.project().mapping
    }
}

impl FromIterator<DynamicField> for FieldList {
    fn from_iter<I: IntoIterator<Item = DynamicField>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(pairs: &[(&str, &str)]) -> FieldList {
        pairs.iter().map(|(k, d)| DynamicField::new(*k, *d)).collect()
    }

    #[test]
    fn blank_keys_are_dropped() {
        let fields = list(&[(" ", "x"), ("city", "y")]);
        let p = fields.project();
        assert_eq!(p.mapping, IndexMap::<String, String>::from([("city".into(), "y".into())]));
        assert_eq!(p.dropped_blank, 1);
    }

    #[test]
    fn duplicate_keys_keep_the_last_entry() {
        let fields = list(&[("a", "1"), ("a", "2")]);
        let p = fields.project();
        assert_eq!(p.mapping, IndexMap::<String, String>::from([("a".into(), "2".into())]));
        assert_eq!(p.overwritten, 1);
    }

    #[test]
    fn keys_are_trimmed_before_comparison() {
        let fields = list(&[("  a", "1"), ("a  ", "2")]);
        assert_eq!(
            fields.to_mapping(),
            IndexMap::<String, String>::from([("a".into(), "2".into())])
        );
    }

    #[test]
    fn descriptions_are_kept_verbatim() {
        let fields = list(&[("name", "  Ask for SURNAME too  ")]);
        assert_eq!(fields.to_mapping()["name"], "  Ask for SURNAME too  ");
    }

    #[test]
    fn mapping_roundtrip_is_identity() {
        let mapping = IndexMap::from([
            ("city".to_string(), "delivery city".to_string()),
            ("name".to_string(), "full name".to_string()),
        ]);
        assert_eq!(FieldList::from_mapping(&mapping).to_mapping(), mapping);
    }

    #[test]
    fn mapping_order_survives_roundtrip() {
        let mapping = IndexMap::from([
            ("name".to_string(), "full name".to_string()),
            ("address".to_string(), "delivery address".to_string()),
            ("city".to_string(), "delivery city".to_string()),
        ]);
        let back = FieldList::from_mapping(&mapping).to_mapping();
        assert_eq!(
            back.keys().collect::<Vec<_>>(),
            vec!["name", "address", "city"]
        );
    }

    #[test]
    fn push_then_remove_restores_list() {
        let mut fields = list(&[("a", "1"), ("b", "2")]);
        let before = fields.clone();
        let idx = fields.push_empty();
        assert_eq!(fields.get(idx), Some(&DynamicField::default()));
        fields.remove(idx);
        assert_eq!(fields, before);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut fields = list(&[("a", "1")]);
        assert!(fields.remove(5).is_none());
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn update_changes_only_the_target_attribute() {
        let mut fields = list(&[("name", "full name")]);
        assert!(fields.update(0, FieldAttr::Description, "legal name"));
        assert_eq!(fields.get(0), Some(&DynamicField::new("name", "legal name")));
        assert!(fields.update(0, FieldAttr::Key, ""));
        assert_eq!(fields.get(0).unwrap().key, "");
    }

    #[test]
    fn update_out_of_range_reports_false() {
        let mut fields = FieldList::new();
        assert!(!fields.update(0, FieldAttr::Key, "a"));
        assert!(fields.is_empty());
    }
}
