//! Field accessors and mutators.
//!
//! Getters check, in order: the handle is live (NotFound), the node is the
//! right kind (TypeMismatch), the field was ever set (AttributeMissing).
//! Setters of identity-bearing names re-check sibling uniqueness first.

use super::{Document, check_section_name, check_word};
use crate::error::{Error, Result};
use crate::tree::{NodeData, NodeId, NodeKind};

impl Document {
    /// The type string of a section, read from its SectionType.
    pub fn section_type(&self, section: NodeId) -> Result<&str> {
        let section_type = self.owning_type(section)?;
        self.live(section_type)?
            .data
            .name()
            .ok_or(Error::AttributeMissing("type"))
    }

    pub fn section_name(&self, section: NodeId) -> Result<&str> {
        self.live_of(section, NodeKind::SectionName)?
            .data
            .name()
            .ok_or(Error::AttributeMissing("name"))
    }

    /// Give a section an explicit name.
    ///
    /// The name must be unique among the live sections of the same type and
    /// must not look anonymous.
    pub fn set_section_name(&mut self, section: NodeId, name: &str) -> Result<()> {
        let section_type = self.owning_type(section)?;
        check_section_name(name)?;
        self.ensure_unique(section_type, name, Some(section))?;
        self.write_name(section, name);
        Ok(())
    }

    pub fn option_name(&self, option: NodeId) -> Result<&str> {
        self.live_of(option, NodeKind::Option)?
            .data
            .name()
            .ok_or(Error::AttributeMissing("name"))
    }

    pub fn set_option_name(&mut self, option: NodeId, name: &str) -> Result<()> {
        self.rename_entry(option, NodeKind::Option, "option name", name)
    }

    pub fn option_value(&self, option: NodeId) -> Result<&str> {
        self.live_of(option, NodeKind::Option)?
            .data
            .value()
            .ok_or(Error::AttributeMissing("value"))
    }

    pub fn set_option_value(&mut self, option: NodeId, value: &str) -> Result<()> {
        self.live_of(option, NodeKind::Option)?;
        if let Some(NodeData::Option { value: slot, .. }) = self.data_mut(option) {
            *slot = Some(value.to_string());
        }
        Ok(())
    }

    pub fn list_name(&self, list: NodeId) -> Result<&str> {
        self.live_of(list, NodeKind::List)?
            .data
            .name()
            .ok_or(Error::AttributeMissing("name"))
    }

    pub fn set_list_name(&mut self, list: NodeId, name: &str) -> Result<()> {
        self.rename_entry(list, NodeKind::List, "list name", name)
    }

    pub fn list_element_value(&self, element: NodeId) -> Result<&str> {
        self.live_of(element, NodeKind::ListItem)?
            .data
            .value()
            .ok_or(Error::AttributeMissing("value"))
    }

    pub fn set_list_element_value(&mut self, element: NodeId, value: &str) -> Result<()> {
        self.live_of(element, NodeKind::ListItem)?;
        if let Some(NodeData::ListItem { value: slot }) = self.data_mut(element) {
            *slot = Some(value.to_string());
        }
        Ok(())
    }

    /// Values of a list's live elements, in order.
    pub fn list_values(&self, list: NodeId) -> Result<Vec<&str>> {
        self.live_of(list, NodeKind::List)?;
        Ok(self
            .pool()
            .live_children(list)
            .filter_map(|item| self.pool().get(item).and_then(|node| node.data.value()))
            .collect())
    }

    fn rename_entry(&mut self, id: NodeId, kind: NodeKind, what: &str, name: &str) -> Result<()> {
        let parent = self
            .live_of(id, kind)?
            .parent
            .ok_or_else(|| Error::NotFound(format!("node {id} has been removed")))?;
        check_word(what, name)?;
        self.ensure_unique(parent, name, Some(id))?;
        self.write_name(id, name);
        Ok(())
    }

    fn write_name(&mut self, id: NodeId, new_name: &str) {
        if let Some(
            NodeData::SectionType { name, .. }
            | NodeData::SectionName { name }
            | NodeData::Option { name, .. }
            | NodeData::List { name },
        ) = self.data_mut(id)
        {
            *name = Some(new_name.to_string());
        }
    }

    fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.pool_mut().get_mut(id).map(|node| &mut node.data)
    }
}
