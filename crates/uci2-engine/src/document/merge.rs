//! Section type changes, type-group merging and anonymous naming.
//!
//! All sections sharing a type string hang under one SectionType node. When
//! a section's type is set, its (shared) SectionType is renamed, any other
//! group now carrying the same string is folded into the first one, and the
//! section gets an `@<type>[<N>]` name if it has no explicit one.
//!
//! `<N>` comes from a per-group counter that only ever grows, so removing
//! `@interface[1]` and adding another anonymous interface yields
//! `@interface[3]` (given three were added before), never a reused number.

use std::collections::HashMap;

use super::{Document, check_word};
use crate::error::{Error, Result};
use crate::tree::{NodeData, NodeId, NodeKind};

impl Document {
    /// Set the type of `section` and merge/rename as described in the
    /// module docs. Runs in full on every call, even when the type is
    /// unchanged.
    pub fn set_section_type(&mut self, section: NodeId, type_: &str) -> Result<()> {
        let section_type = self.owning_type(section)?;
        check_word("section type", type_)?;
        let config = self.config_root()?;

        if let Some(target) = self.find_section_type(config, type_)
            && target != section_type
        {
            self.check_merge_names(section_type, target)?;
        }

        if let Some(NodeData::SectionType { name, .. }) =
            self.pool_mut().get_mut(section_type).map(|node| &mut node.data)
        {
            *name = Some(type_.to_string());
        }

        self.merge_section_types(config);
        self.assign_anonymous_name(section);
        Ok(())
    }

    /// Live SectionType directly above a live SectionName.
    pub(crate) fn owning_type(&self, section: NodeId) -> Result<NodeId> {
        self.live_of(section, NodeKind::SectionName)?
            .parent
            .ok_or_else(|| Error::NotFound(format!("section {section} has been removed")))
    }

    /// Explicitly named sections of `from` must not collide with any live
    /// section of `into` once the two groups merge.
    fn check_merge_names(&self, from: NodeId, into: NodeId) -> Result<()> {
        for section in self.pool().live_children(from) {
            let Some(name) = self.pool().get(section).and_then(|n| n.data.name()) else {
                continue;
            };
            if name.starts_with('@') {
                continue;
            }
            self.ensure_unique(into, name, None)?;
        }
        Ok(())
    }

    /// Fold every live SectionType into the first live one carrying the
    /// same string. Absorbed groups are left empty and tombstoned.
    fn merge_section_types(&mut self, config: NodeId) {
        let types: Vec<NodeId> = self.pool().live_children(config).collect();
        let mut canonical: HashMap<String, NodeId> = HashMap::new();

        for ty in types {
            let Some(name) = self
                .pool()
                .get(ty)
                .and_then(|node| node.data.name())
                .map(str::to_string)
            else {
                continue;
            };

            let Some(&into) = canonical.get(&name) else {
                canonical.insert(name, ty);
                continue;
            };

            let absorbed_count = anonymous_count(self, ty);
            let pool = self.pool_mut();
            pool.move_children(ty, into);
            if let Some(NodeData::SectionType {
                anonymous_count, ..
            }) = pool.get_mut(into).map(|node| &mut node.data)
            {
                *anonymous_count = (*anonymous_count).max(absorbed_count);
            }
            if let Some(node) = pool.get_mut(ty) {
                node.parent = None;
            }
            log::trace!("merged section type {name} {ty} into {into}");
        }
    }

    /// Give `section` the next `@<type>[<N>]` name of its group unless it
    /// has an explicit name or already an anonymous name of this type.
    pub(super) fn assign_anonymous_name(&mut self, section: NodeId) {
        let Some(section_type) = self.pool().get(section).and_then(|node| node.parent) else {
            return;
        };
        let Some(type_) = self
            .pool()
            .get(section_type)
            .and_then(|node| node.data.name())
            .map(str::to_string)
        else {
            return;
        };

        let current = self.pool().get(section).and_then(|node| node.data.name());
        let needs_name = match current {
            None => true,
            Some(name) => name.starts_with('@') && !is_anonymous_name_of(name, &type_),
        };
        if !needs_name {
            return;
        }

        let pool = self.pool_mut();
        let mut number = 0;
        if let Some(NodeData::SectionType {
            anonymous_count, ..
        }) = pool.get_mut(section_type).map(|node| &mut node.data)
        {
            number = *anonymous_count;
            *anonymous_count += 1;
        }
        let anonymous = format!("@{type_}[{number}]");
        log::trace!("section {section} named {anonymous}");
        if let Some(NodeData::SectionName { name }) =
            pool.get_mut(section).map(|node| &mut node.data)
        {
            *name = Some(anonymous);
        }
    }
}

fn anonymous_count(doc: &Document, section_type: NodeId) -> usize {
    match doc.pool().get(section_type).map(|node| &node.data) {
        Some(NodeData::SectionType {
            anonymous_count, ..
        }) => *anonymous_count,
        _ => 0,
    }
}

/// `@<type_>[<digits>]`
fn is_anonymous_name_of(name: &str, type_: &str) -> bool {
    name.strip_prefix('@')
        .and_then(|rest| rest.strip_prefix(type_))
        .and_then(|rest| rest.strip_prefix('['))
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::live_names;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("@system[0]", "system", true)]
    #[case("@system[12]", "system", true)]
    #[case("@system[]", "system", false)]
    #[case("@system[x]", "system", false)]
    #[case("@systemd[0]", "system", false)]
    #[case("system[0]", "system", false)]
    fn anonymous_name_shape(#[case] name: &str, #[case] type_: &str, #[case] expected: bool) {
        assert_eq!(is_anonymous_name_of(name, type_), expected);
    }

    #[test]
    fn anonymous_sections_are_numbered_in_order() {
        let mut doc = Document::new();
        let root = doc.root();

        doc.section_add(root, "firewall", None).unwrap();
        doc.section_add(root, "firewall", None).unwrap();
        doc.section_add(root, "system", None).unwrap();

        assert_eq!(
            live_names(&doc),
            vec!["@firewall[0]", "@firewall[1]", "@system[0]"]
        );
    }

    #[test]
    fn numbers_are_never_reused() {
        // Given three anonymous interfaces
        let mut doc = Document::new();
        let root = doc.root();
        for _ in 0..3 {
            doc.section_add(root, "interface", None).unwrap();
        }

        // When the middle one is removed and another is added
        let middle = doc.get(Some("@interface[1]"), None).unwrap();
        doc.remove(middle).unwrap();
        doc.section_add(root, "interface", None).unwrap();

        // Then the new one gets a fresh number
        assert_eq!(
            live_names(&doc),
            vec!["@interface[0]", "@interface[2]", "@interface[3]"]
        );
    }

    #[test]
    fn same_type_sections_share_one_group() {
        // Given sections of two types interleaved
        let mut doc = Document::new();
        let root = doc.root();
        doc.section_add(root, "interface", Some("lan")).unwrap();
        doc.section_add(root, "switch", None).unwrap();
        doc.section_add(root, "interface", Some("wan")).unwrap();

        // Then there is one live group per type, in first-seen order
        let config = doc.config_root().unwrap();
        let groups: Vec<_> = doc.pool().live_children(config).collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(live_names(&doc), vec!["lan", "wan", "@switch[0]"]);
    }

    #[test]
    fn retyping_merges_whole_group_in_order() {
        // Given two groups
        let mut doc = Document::new();
        let root = doc.root();
        doc.section_add(root, "interface", Some("lan")).unwrap();
        let eth = doc.section_add(root, "device", Some("eth0")).unwrap();
        doc.section_add(root, "device", Some("eth1")).unwrap();

        // When one device is retyped to interface
        doc.set_section_type(eth, "interface").unwrap();

        // Then the whole device group joined interface after its own sections
        assert_eq!(live_names(&doc), vec!["lan", "eth0", "eth1"]);
        let config = doc.config_root().unwrap();
        assert_eq!(doc.pool().live_children(config).count(), 1);
        assert_eq!(doc.section_type(eth).unwrap(), "interface");
    }

    #[test]
    fn retyping_renumbers_only_the_retyped_section() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.section_add(root, "interface", None).unwrap();
        let rule = doc.section_add(root, "rule", None).unwrap();

        doc.set_section_type(rule, "interface").unwrap();

        assert_eq!(live_names(&doc), vec!["@interface[0]", "@interface[1]"]);
    }

    #[test]
    fn setting_same_type_keeps_anonymous_name() {
        let mut doc = Document::new();
        let section = doc.section_add(doc.root(), "system", None).unwrap();

        doc.set_section_type(section, "system").unwrap();

        assert_eq!(doc.section_name(section).unwrap(), "@system[0]");
    }

    #[test]
    fn merge_keeps_highest_counter() {
        // Given a first group that issued one number and a second that issued three
        let mut doc = Document::new();
        let root = doc.root();
        let first = doc.section_add(root, "a", None).unwrap();
        for _ in 0..3 {
            doc.section_add(root, "b", None).unwrap();
        }

        // When the first group is renamed to b it becomes canonical
        doc.set_section_type(first, "b").unwrap();

        // Then the retyped section does not reuse a b number
        assert_eq!(doc.section_name(first).unwrap(), "@b[3]");
    }

    #[test]
    fn merge_rejects_name_collisions() {
        // Given lan under both interface and zone
        let mut doc = Document::new();
        let root = doc.root();
        doc.section_add(root, "interface", Some("lan")).unwrap();
        let zone = doc.section_add(root, "zone", Some("lan")).unwrap();

        // When retyping the zone to interface
        let err = doc.set_section_type(zone, "interface").unwrap_err();

        // Then it fails and nothing moved
        assert!(matches!(err, Error::Duplicate(name) if name == "lan"));
        assert_eq!(doc.section_type(zone).unwrap(), "zone");
    }

    #[test]
    fn set_section_type_validates() {
        let mut doc = Document::new();
        let section = doc.section_add(doc.root(), "system", None).unwrap();
        let option = doc.option_add(section, "hostname", "x").unwrap();

        assert!(matches!(doc.set_section_type(section, "a b"), Err(Error::InvalidArgument(_))));
        assert!(matches!(doc.set_section_type(option, "x"), Err(Error::TypeMismatch(_))));
        doc.remove(section).unwrap();
        assert!(matches!(doc.set_section_type(section, "x"), Err(Error::NotFound(_))));
    }
}
