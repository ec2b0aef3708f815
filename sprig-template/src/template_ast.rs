use serde::Serialize;

/// One event-binding attribute: `name` is the DOM event, `value` is raw
/// handler source to splice into the generated listener.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventBinding {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    Element {
        #[serde(rename = "tagName")]
        tag: String,
        events: Vec<EventBinding>,
        children: Vec<Node>,
    },
    /// `template == true` means `value` is raw expression source spliced as
    /// live code; otherwise `value` is a literal emitted as a quoted string.
    Text {
        value: String,
        template: bool,
    },
    /// Raw CSS source. Leaf: never recurses, never registers events.
    Style {
        value: String,
    },
    /// Raw script source, spliced verbatim into the generated program.
    Script {
        value: String,
    },
}

/// Root container of one compiled template. Carries no tag and no events by
/// construction; exactly one exists per compilation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type")]
pub struct App {
    pub children: Vec<Node>,
}
