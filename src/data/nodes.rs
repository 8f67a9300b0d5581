use crate::core::geo::{GeoPoint, Point};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Direction a label is pushed away from its node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

impl Slot {
    /// Unit vector in screen space (y grows downwards)
    pub fn direction(self) -> Point {
        match self {
            Slot::Top => Point::new(0.0, -1.0),
            Slot::Right => Point::new(1.0, 0.0),
            Slot::Bottom => Point::new(0.0, 1.0),
            Slot::Left => Point::new(-1.0, 0.0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Slot::Top | Slot::Bottom)
    }
}

/// A labelled point of interest pinned to a geographic anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    /// Explicit navigation target; derived from the id when absent
    #[serde(default)]
    pub link: Option<String>,
    pub anchor: GeoPoint,
    #[serde(default)]
    pub slot: Slot,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, anchor: GeoPoint, slot: Slot) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            link: None,
            anchor,
            slot,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Navigation target: the explicit link or `{prefix}{id}`
    pub fn link(&self, prefix: &str) -> String {
        match &self.link {
            Some(link) => link.clone(),
            None => format!("{}{}", prefix, self.id),
        }
    }

    /// Parses a JSON array of node records
    pub fn list_from_json(json: &str) -> Result<Vec<Node>> {
        let nodes: Vec<Node> = serde_json::from_str(json)?;
        for node in nodes.iter().filter(|node| !node.anchor.is_valid()) {
            log::warn!("node {} has an out-of-range anchor {:?}", node.id, node.anchor);
        }
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_node_list() {
        let json = r#"[
            {"id": "sma", "label": "Southern Sami", "anchor": {"lon": 13.5, "lat": 64.0}, "slot": "left"},
            {"id": "se", "label": "North Sami", "anchor": {"lon": 24.0, "lat": 69.0}, "link": "/north"}
        ]"#;
        let nodes = Node::list_from_json(json).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].slot, Slot::Left);
        assert_eq!(nodes[1].slot, Slot::Top);
        assert_eq!(nodes[0].link("/language/"), "/language/sma");
        assert_eq!(nodes[1].link("/language/"), "/north");
    }

    #[test]
    fn test_slot_directions() {
        assert!(Slot::Top.direction().y < 0.0);
        assert!(Slot::Bottom.direction().y > 0.0);
        assert!(Slot::Left.direction().x < 0.0);
        assert!(Slot::Right.direction().x > 0.0);
        assert!(Slot::Top.is_vertical() && !Slot::Right.is_vertical());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Node::list_from_json("[{\"id\": 3}]").is_err());
    }
}
