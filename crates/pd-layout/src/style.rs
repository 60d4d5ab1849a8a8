//! draw.io style strings for each shape and arrow kind.

pub const PARTICIPANT: &str = "rounded=0;whiteSpace=wrap;html=1;fillColor=#dae8fc;strokeColor=#6c8ebf;";
pub const ACTOR: &str = "shape=umlActor;verticalLabelPosition=bottom;verticalAlign=top;html=1;";
pub const CLASS: &str = "rounded=0;whiteSpace=wrap;html=1;fillColor=#dae8fc;strokeColor=#6c8ebf;";
pub const INTERFACE: &str =
    "rounded=0;whiteSpace=wrap;html=1;fillColor=#fff2cc;strokeColor=#d6b656;fontStyle=2";
pub const USECASE: &str = "ellipse;whiteSpace=wrap;html=1;fillColor=#d5e8d4;strokeColor=#82b366;";
pub const TERMINAL: &str = "ellipse;whiteSpace=wrap;html=1;aspect=fixed;fillColor=#000000;";
pub const ACTION: &str = "rounded=1;whiteSpace=wrap;html=1;fillColor=#dae8fc;strokeColor=#6c8ebf;";
pub const DECISION: &str = "rhombus;whiteSpace=wrap;html=1;fillColor=#fff2cc;strokeColor=#d6b656;";

/// Common prefix for every connector.
pub const EDGE_BASE: &str = "edgeStyle=orthogonalEdgeStyle;rounded=0;html=1;";

pub const ARROW_SYNC: &str = "endArrow=block;endFill=1;";
pub const ARROW_ASYNC: &str = "endArrow=open;endFill=0;";
pub const ARROW_RETURN: &str = "dashed=1;endArrow=open;endFill=0;";
pub const ARROW_INHERITANCE: &str = "endArrow=block;endFill=0;endSize=12;";
pub const ARROW_IMPLEMENTATION: &str = "dashed=1;endArrow=block;endFill=0;endSize=12;";
pub const ARROW_AGGREGATION: &str = "endArrow=diamond;endFill=0;endSize=12;";
pub const ARROW_COMPOSITION: &str = "endArrow=diamond;endFill=1;endSize=12;";
pub const ARROW_ASSOCIATION: &str = "endArrow=none;endFill=0;";
pub const ARROW_DEPENDENCY: &str = "dashed=1;endArrow=open;endFill=0;";
pub const ARROW_TRANSITION: &str = "endArrow=block;endFill=1;";
