// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Navtrail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Navtrail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ids::{NodeId, PageId};

/// Longest display name stored for an entry; anything longer is cut and the
/// cut is marked with `…`.
pub const MAX_NAME_LEN: usize = 40;

/// Node kinds the panel distinguishes.
///
/// `Page` is the synthetic kind recorded when nothing is selected. Host tags
/// outside this set deserialize as `Unknown` instead of poisoning a stored
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Page,
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    Instance,
    Text,
    Rectangle,
    Ellipse,
    Polygon,
    Star,
    Line,
    Vector,
    BooleanOperation,
    Unknown,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "PAGE",
            Self::Frame => "FRAME",
            Self::Group => "GROUP",
            Self::Section => "SECTION",
            Self::Component => "COMPONENT",
            Self::ComponentSet => "COMPONENT_SET",
            Self::Instance => "INSTANCE",
            Self::Text => "TEXT",
            Self::Rectangle => "RECTANGLE",
            Self::Ellipse => "ELLIPSE",
            Self::Polygon => "POLYGON",
            Self::Star => "STAR",
            Self::Line => "LINE",
            Self::Vector => "VECTOR",
            Self::BooleanOperation => "BOOLEAN_OPERATION",
            Self::Unknown => "UNKNOWN",
        }
    }

    fn from_tag(tag: &str) -> Self {
        match tag {
            "PAGE" => Self::Page,
            "FRAME" => Self::Frame,
            "GROUP" => Self::Group,
            "SECTION" => Self::Section,
            "COMPONENT" => Self::Component,
            "COMPONENT_SET" => Self::ComponentSet,
            "INSTANCE" => Self::Instance,
            "TEXT" => Self::Text,
            "RECTANGLE" => Self::Rectangle,
            "ELLIPSE" => Self::Ellipse,
            "POLYGON" => Self::Polygon,
            "STAR" => Self::Star,
            "LINE" => Self::Line,
            "VECTOR" => Self::Vector,
            "BOOLEAN_OPERATION" => Self::BooleanOperation,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// Auto-layout mode as reported by the host.
///
/// Defaults to `None` unconditionally, for non-container kinds too; tags we
/// do not recognize also land on `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
    Grid,
}

impl LayoutMode {
    /// Whether the mode marks an active auto-layout container.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Horizontal => "HORIZONTAL",
            Self::Vertical => "VERTICAL",
            Self::Grid => "GRID",
        }
    }

    fn from_tag(tag: &str) -> Self {
        match tag {
            "HORIZONTAL" => Self::Horizontal,
            "VERTICAL" => Self::Vertical,
            "GRID" => Self::Grid,
            _ => Self::None,
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LayoutMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LayoutMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// Panel icon tag.
///
/// Derived, never user-supplied; stored on the entry so the panel does not
/// have to re-derive it for sequences written by older builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconTag {
    Page,
    AutoLayout,
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    Instance,
    Text,
    Shape,
    #[default]
    Default,
}

impl IconTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "PAGE",
            Self::AutoLayout => "AUTO_LAYOUT",
            Self::Frame => "FRAME",
            Self::Group => "GROUP",
            Self::Section => "SECTION",
            Self::Component => "COMPONENT",
            Self::ComponentSet => "COMPONENT_SET",
            Self::Instance => "INSTANCE",
            Self::Text => "TEXT",
            Self::Shape => "SHAPE",
            Self::Default => "DEFAULT",
        }
    }

    fn from_tag(tag: &str) -> Self {
        match tag {
            "PAGE" => Self::Page,
            "AUTO_LAYOUT" => Self::AutoLayout,
            "FRAME" => Self::Frame,
            "GROUP" => Self::Group,
            "SECTION" => Self::Section,
            "COMPONENT" => Self::Component,
            "COMPONENT_SET" => Self::ComponentSet,
            "INSTANCE" => Self::Instance,
            "TEXT" => Self::Text,
            "SHAPE" => Self::Shape,
            _ => Self::Default,
        }
    }
}

impl fmt::Display for IconTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IconTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IconTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// Icon for a node kind, special-casing active auto-layout containers ahead
/// of the generic kind mapping. Total: anything unrecognized lands on
/// `IconTag::Default`.
pub fn derive_icon(kind: NodeKind, layout_mode: LayoutMode) -> IconTag {
    if layout_mode.is_active()
        && matches!(
            kind,
            NodeKind::Frame | NodeKind::Component | NodeKind::ComponentSet | NodeKind::Instance
        )
    {
        return IconTag::AutoLayout;
    }

    match kind {
        NodeKind::Page => IconTag::Page,
        NodeKind::Frame => IconTag::Frame,
        NodeKind::Group => IconTag::Group,
        NodeKind::Section => IconTag::Section,
        NodeKind::Component => IconTag::Component,
        NodeKind::ComponentSet => IconTag::ComponentSet,
        NodeKind::Instance => IconTag::Instance,
        NodeKind::Text => IconTag::Text,
        NodeKind::Rectangle
        | NodeKind::Ellipse
        | NodeKind::Polygon
        | NodeKind::Star
        | NodeKind::Line
        | NodeKind::Vector
        | NodeKind::BooleanOperation => IconTag::Shape,
        NodeKind::Unknown => IconTag::Default,
    }
}

/// Cap a display name at `MAX_NAME_LEN` characters, marking the cut with
/// `…`. Counts characters, not bytes, so multi-byte names are never split.
pub fn truncate_display_name(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_LEN {
        return name.to_owned();
    }

    let mut truncated: String = name.chars().take(MAX_NAME_LEN - 1).collect();
    truncated.push('…');
    truncated
}

/// One recorded visited location: a page plus an optional node on it.
///
/// The serialized field names (`pageId`, `nodeId`, …) are the layout the
/// storage slot has always held; do not rename them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub page_id: PageId,
    pub page_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    pub node_type: NodeKind,
    #[serde(default)]
    pub layout_mode: LayoutMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconTag>,
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Identity check: same `(pageId, nodeId)` means the same logical
    /// location. A missing node id is its own identity ("the page itself").
    pub fn same_location(&self, other: &Self) -> bool {
        self.page_id == other.page_id && self.node_id == other.node_id
    }
}
