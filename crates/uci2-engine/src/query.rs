//! Dotted path lookup: `section` or `section.option`.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::tree::NodeId;

impl Document {
    /// Resolve a dotted path with [`Document::get`].
    ///
    /// `""` is the config root, `"lan"` a section and `"lan.proto"` an
    /// option or list. Anonymous sections are addressed by their generated
    /// name, e.g. `"@rule[2].target"`.
    ///
    /// Section and option names may themselves contain dots. The whole path
    /// is tried as a section name first, then every `<section>.<option>`
    /// split from the leftmost dot on. The first one that exists wins.
    pub fn query(&self, path: &str) -> Result<NodeId> {
        if path.is_empty() {
            return self.get(None, None);
        }
        check_path(path)?;

        match self.get(Some(path), None) {
            Err(Error::NotFound(_)) => {}
            found => return found,
        }
        for (section, option) in splits(path) {
            match self.get(Some(section), Some(option)) {
                Err(Error::NotFound(_)) => {}
                found => return found,
            }
        }
        log::debug!("nothing at {path:?}");
        Err(Error::NotFound(format!("path {path}")))
    }

    /// Split `<section>.<entry>` where the entry need not exist yet.
    ///
    /// Returns the first live section named by a prefix of `path` together
    /// with the rest of the path.
    pub fn query_entry<'p>(&self, path: &'p str) -> Result<(NodeId, &'p str)> {
        check_path(path)?;
        let mut splits = splits(path).peekable();
        if splits.peek().is_none() {
            return Err(Error::InvalidArgument(format!(
                "path {path:?} must be <section>.<option>"
            )));
        }
        for (section, entry) in splits {
            match self.get(Some(section), None) {
                Ok(id) => return Ok((id, entry)),
                Err(Error::NotFound(_)) => {}
                Err(err) => return Err(err),
            }
        }
        log::debug!("no section prefix in {path:?}");
        Err(Error::NotFound(format!("section of {path}")))
    }
}

fn check_path(path: &str) -> Result<()> {
    if path.is_empty() || path.starts_with('.') || path.ends_with('.') {
        log::debug!("malformed path {path:?}");
        return Err(Error::InvalidArgument(format!(
            "path {path:?} must be <section> or <section>.<option>"
        )));
    }
    Ok(())
}

/// Every `(before, after)` split of `path` at a dot, leftmost first.
fn splits(path: &str) -> impl Iterator<Item = (&str, &str)> {
    path.match_indices('.')
        .map(move |(dot, _)| (&path[..dot], &path[dot + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn network() -> Document {
        Document::parse("config interface lan\n\toption proto static\nconfig rule\n\toption target ACCEPT\n")
            .unwrap()
    }

    #[test]
    fn resolves_like_get() {
        let doc = network();

        assert_eq!(doc.query("").unwrap(), doc.get(None, None).unwrap());
        assert_eq!(doc.query("lan").unwrap(), doc.get(Some("lan"), None).unwrap());
        assert_eq!(
            doc.query("lan.proto").unwrap(),
            doc.get(Some("lan"), Some("proto")).unwrap()
        );
        let target = doc.query("@rule[0].target").unwrap();
        assert_eq!(doc.option_value(target).unwrap(), "ACCEPT");
    }

    #[rstest]
    #[case(".proto")]
    #[case("lan.")]
    fn malformed_paths(#[case] path: &str) {
        assert!(matches!(network().query(path), Err(Error::InvalidArgument(_))));
    }

    #[rstest]
    #[case("wan")]
    #[case("lan.mtu")]
    #[case("lan.proto.x")]
    fn missing_nodes(#[case] path: &str) {
        assert!(matches!(network().query(path), Err(Error::NotFound(_))));
    }

    #[test]
    fn dotted_section_names_resolve() {
        // Given a section whose explicit name contains dots
        let mut doc = network();
        let host = doc.section_add(doc.root(), "host", Some("nas.lan")).unwrap();
        let ip = doc.option_add(host, "ip", "10.0.0.2").unwrap();

        // Then both the section and its option are reachable
        assert_eq!(doc.query("nas.lan").unwrap(), host);
        assert_eq!(doc.query("nas.lan.ip").unwrap(), ip);
        assert_eq!(doc.query_entry("nas.lan.mac").unwrap(), (host, "mac"));
    }

    #[test]
    fn entry_path_needs_a_live_section() {
        let doc = network();

        assert_eq!(doc.query_entry("lan.mtu").unwrap(), (doc.query("lan").unwrap(), "mtu"));
        assert!(matches!(doc.query_entry("lan"), Err(Error::InvalidArgument(_))));
        assert!(matches!(doc.query_entry("wan.mtu"), Err(Error::NotFound(_))));
    }
}
