//! The non-interactive subcommands, as functions over a loaded document.
//!
//! Each returns the text to print. Mutating commands leave writing the file
//! to the caller.

use uci2_engine::{Document, Error, NodeId, NodeType, Result};

/// `uci show` style listing of the whole document, a section or one entry.
///
/// ```text
/// network.lan=interface
/// network.lan.proto='static'
/// network.lan.dns='8.8.8.8' '8.8.4.4'
/// ```
pub fn show(doc: &Document, config: &str, path: Option<&str>) -> Result<String> {
    let mut out = String::new();
    let Some(path) = path else {
        for section in doc.sections() {
            show_section(doc, config, section, &mut out)?;
        }
        return Ok(out);
    };

    let node = doc.query(path)?;
    match doc.node_type(node)? {
        NodeType::Section => show_section(doc, config, node, &mut out)?,
        NodeType::Option | NodeType::List => {
            let section = owning_section(doc, node)?;
            let prefix = format!("{config}.{}", doc.section_name(section)?);
            show_entry(doc, &prefix, node, &mut out)?;
        }
        NodeType::Root | NodeType::ListElement => {
            for section in doc.sections() {
                show_section(doc, config, section, &mut out)?;
            }
        }
    }
    Ok(out)
}

fn show_section(doc: &Document, config: &str, section: NodeId, out: &mut String) -> Result<()> {
    let prefix = format!("{config}.{}", doc.section_name(section)?);
    out.push_str(&format!("{prefix}={}\n", doc.section_type(section)?));
    for entry in doc.iter(section)? {
        show_entry(doc, &prefix, entry, out)?;
    }
    Ok(())
}

fn show_entry(doc: &Document, prefix: &str, entry: NodeId, out: &mut String) -> Result<()> {
    match doc.node_type(entry)? {
        NodeType::Option => {
            let line = format!(
                "{prefix}.{}={}\n",
                doc.option_name(entry)?,
                shell_quote(doc.option_value(entry)?)
            );
            out.push_str(&line);
        }
        NodeType::List => {
            let values: Vec<String> = doc
                .list_values(entry)?
                .into_iter()
                .map(shell_quote)
                .collect();
            out.push_str(&format!("{prefix}.{}={}\n", doc.list_name(entry)?, values.join(" ")));
        }
        _ => {}
    }
    Ok(())
}

/// The type of a section, the value of an option or the space separated
/// elements of a list.
pub fn get(doc: &Document, path: &str) -> Result<String> {
    let node = doc.query(path)?;
    let text = match doc.node_type(node)? {
        NodeType::Section => doc.section_type(node)?.to_string(),
        NodeType::Option => doc.option_value(node)?.to_string(),
        NodeType::List => doc.list_values(node)?.join(" "),
        other => {
            return Err(Error::InvalidArgument(format!(
                "{path:?} names a {other}, not a section or option"
            )));
        }
    };
    Ok(text + "\n")
}

/// Create or overwrite an option. A list of the same name is replaced.
pub fn set(doc: &mut Document, path: &str, value: &str) -> Result<String> {
    let (section, option) = doc.query_entry(path)?;

    let existing = match entry_named(doc, section, option)? {
        Some(id) => Some((id, doc.node_type(id)?)),
        None => None,
    };

    match existing {
        Some((id, NodeType::Option)) => doc.set_option_value(id, value)?,
        Some((list, _)) => {
            log::info!("replacing list {path} with an option");
            doc.remove(list)?;
            doc.option_add(section, option, value)?;
        }
        None => {
            doc.option_add(section, option, value)?;
        }
    }
    Ok(String::new())
}

/// Add a section and print the name it got.
pub fn add(doc: &mut Document, type_: &str, name: Option<&str>) -> Result<String> {
    let root = doc.root();
    let section = doc.section_add(root, type_, name)?;
    Ok(format!("{}\n", doc.section_name(section)?))
}

/// Append to a list, creating it if needed.
pub fn add_list(doc: &mut Document, path: &str, value: &str) -> Result<String> {
    let (section, list_name) = doc.query_entry(path)?;

    let list = match entry_named(doc, section, list_name)? {
        Some(list) => list,
        None => doc.list_add(section, list_name)?,
    };
    doc.list_element_add(list, value)?;
    Ok(String::new())
}

pub fn delete(doc: &mut Document, path: &str) -> Result<String> {
    let node = doc.query(path)?;
    doc.remove(node)?;
    Ok(String::new())
}

/// Rename a section, option or list.
pub fn rename(doc: &mut Document, path: &str, new_name: &str) -> Result<String> {
    let node = doc.query(path)?;
    match doc.node_type(node)? {
        NodeType::Section => doc.set_section_name(node, new_name)?,
        NodeType::Option => doc.set_option_name(node, new_name)?,
        NodeType::List => doc.set_list_name(node, new_name)?,
        other => {
            return Err(Error::TypeMismatch(format!("a {other} cannot be renamed")));
        }
    }
    Ok(String::new())
}

/// Live option or list called `name` in `section`.
fn entry_named(doc: &Document, section: NodeId, name: &str) -> Result<Option<NodeId>> {
    for entry in doc.iter(section)? {
        let entry_name = match doc.node_type(entry)? {
            NodeType::Option => doc.option_name(entry)?,
            NodeType::List => doc.list_name(entry)?,
            _ => continue,
        };
        if entry_name == name {
            return Ok(Some(entry));
        }
    }
    Ok(None)
}

/// The section holding an option or list.
fn owning_section(doc: &Document, entry: NodeId) -> Result<NodeId> {
    for section in doc.sections() {
        if doc.iter(section)?.any(|id| id == entry) {
            return Ok(section);
        }
    }
    Err(Error::NotFound(format!("section of node {entry}")))
}

/// `'value'`, with embedded single quotes written as `'\''`.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
