//! Documentation site configuration
//!
//! Navigation menus, sidebar trees and metadata handed to the static-site
//! generator. This is data only; the converter never reads it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level site configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Path prefix the site is served under, e.g. `/docs/`
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default)]
    pub nav: Vec<NavItem>,
    /// Sidebar trees keyed by the path prefix they apply to
    #[serde(default)]
    pub sidebar: BTreeMap<String, Vec<SidebarGroup>>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

/// A top navigation entry; entries with `items` render as dropdowns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarGroup {
    pub text: String,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub items: Vec<SidebarItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarItem {
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub icon: String,
    pub link: String,
}

fn default_lang() -> String {
    "en-US".to_string()
}

fn default_base() -> String {
    "/".to_string()
}

impl SiteConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// The sidebar whose key is the longest prefix of `path`.
    pub fn sidebar_for(&self, path: &str) -> Option<&[SidebarGroup]> {
        self.sidebar
            .iter()
            .filter(|(prefix, _)| path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, groups)| groups.as_slice())
    }

    /// Every link in the navigation and sidebar trees, in document order.
    pub fn links(&self) -> Vec<&str> {
        fn walk<'a>(items: &'a [NavItem], out: &mut Vec<&'a str>) {
            for item in items {
                if let Some(link) = &item.link {
                    out.push(link.as_str());
                }
                walk(&item.items, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.nav, &mut out);
        for groups in self.sidebar.values() {
            for group in groups {
                out.extend(group.items.iter().map(|i| i.link.as_str()));
            }
        }
        out
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::SiteError("title must not be empty".into()));
        }
        if !self.base.starts_with('/') || !self.base.ends_with('/') {
            return Err(Error::SiteError(format!(
                "base '{}' must start and end with '/'",
                self.base
            )));
        }
        check_nav(&self.nav)?;
        if let Some(empty) = self.links().iter().find(|l| l.trim().is_empty()) {
            return Err(Error::SiteError(format!("empty link '{}'", empty)));
        }
        Ok(())
    }
}

fn check_nav(items: &[NavItem]) -> Result<()> {
    for item in items {
        if item.link.is_none() && item.items.is_empty() {
            return Err(Error::SiteError(format!(
                "nav item '{}' has neither a link nor children",
                item.text
            )));
        }
        check_nav(&item.items)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "title": "Sharecard",
        "description": "Share cards for the docs",
        "base": "/docs/",
        "nav": [
            { "text": "Guide", "link": "/guide/" },
            { "text": "More", "items": [ { "text": "Changelog", "link": "/changelog" } ] }
        ],
        "sidebar": {
            "/guide/": [
                { "text": "Intro", "items": [ { "text": "Getting started", "link": "/guide/start" } ] }
            ],
            "/guide/advanced/": [
                { "text": "Advanced", "collapsed": true, "items": [ { "text": "Presets", "link": "/guide/advanced/presets" } ] }
            ]
        },
        "socialLinks": [ { "icon": "github", "link": "https://example.com/repo" } ]
    }"#;

    #[test]
    fn parses_and_validates_sample() {
        let cfg = SiteConfig::from_json_str(SAMPLE).unwrap();
        assert_eq!(cfg.lang, "en-US");
        assert_eq!(cfg.social_links.len(), 1);
        cfg.validate().unwrap();
    }

    #[test]
    fn sidebar_uses_longest_prefix() {
        let cfg = SiteConfig::from_json_str(SAMPLE).unwrap();
        let groups = cfg.sidebar_for("/guide/advanced/presets").unwrap();
        assert_eq!(groups[0].text, "Advanced");
        assert!(groups[0].collapsed);
        assert_eq!(cfg.sidebar_for("/guide/start").unwrap()[0].text, "Intro");
        assert!(cfg.sidebar_for("/blog/").is_none());
    }

    #[test]
    fn links_cover_nav_dropdowns_and_sidebar() {
        let cfg = SiteConfig::from_json_str(SAMPLE).unwrap();
        assert_eq!(
            cfg.links(),
            vec!["/guide/", "/changelog", "/guide/start", "/guide/advanced/presets"]
        );
    }

    #[test]
    fn validate_rejects_bad_base_and_dangling_nav() {
        let mut cfg = SiteConfig::from_json_str(SAMPLE).unwrap();
        cfg.base = "docs".into();
        assert!(matches!(cfg.validate(), Err(Error::SiteError(_))));

        let mut cfg = SiteConfig::from_json_str(SAMPLE).unwrap();
        cfg.nav.push(NavItem { text: "Empty".into(), link: None, items: vec![] });
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("Empty"));
    }

    #[test]
    fn malformed_json_is_a_site_error() {
        assert!(matches!(SiteConfig::from_json_str("{"), Err(Error::SiteError(_))));
    }
}
