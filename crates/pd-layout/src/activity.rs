//! Activity flow layout: a single vertical spine with decision branches
//! offset left and right, rejoining below the longer branch.

use pd_core::Activity;

use crate::{style, GraphBuilder};

const X_CENTER: i64 = 300;
const Y_START: i64 = 100;
const Y_STEP: i64 = 100;
const BRANCH_OFFSET: i64 = 180;

const TERMINAL_SIZE: i64 = 30;
const ACTION_WIDTH: i64 = 160;
const ACTION_HEIGHT: i64 = 40;
const DECISION_WIDTH: i64 = 100;
const DECISION_HEIGHT: i64 = 60;

/// Edges waiting to be connected to the next node. The label rides along
/// from the decision markup (`then (yes)` / `else (no)`).
type OpenExits = Vec<(String, Option<String>)>;

pub(crate) fn generate_activity(flow: &[Activity], builder: &mut GraphBuilder) {
    let mut exits: OpenExits = Vec::new();
    emit_flow(flow, builder, X_CENTER, Y_START, &mut exits);
}

/// Lay out one linear run of activities at column `x`, starting at `y`.
/// Returns the y coordinate just past the last emitted node.
fn emit_flow(
    flow: &[Activity],
    builder: &mut GraphBuilder,
    x: i64,
    mut y: i64,
    exits: &mut OpenExits,
) -> i64 {
    for activity in flow {
        match activity {
            Activity::Start | Activity::Stop => {
                let id = builder.add_node(
                    activity_label(activity),
                    style::TERMINAL,
                    x,
                    y,
                    TERMINAL_SIZE,
                    TERMINAL_SIZE,
                );
                connect_exits(builder, exits, &id);
                exits.push((id, None));
                y += Y_STEP;
            }
            Activity::Action { label } => {
                let id = builder.add_node(label, style::ACTION, x, y, ACTION_WIDTH, ACTION_HEIGHT);
                connect_exits(builder, exits, &id);
                exits.push((id, None));
                y += Y_STEP;
            }
            Activity::Decision {
                condition,
                then_label,
                else_label,
                then_branch,
                else_branch,
            } => {
                let id = builder.add_node(
                    condition,
                    style::DECISION,
                    x,
                    y,
                    DECISION_WIDTH,
                    DECISION_HEIGHT,
                );
                connect_exits(builder, exits, &id);
                y += Y_STEP;

                // Then-branch to the left, else-branch to the right. An
                // empty branch passes the decision straight through to the
                // rejoin point, keeping its label.
                let mut then_exits: OpenExits = vec![(id.clone(), then_label.clone())];
                let then_y = emit_flow(then_branch, builder, x - BRANCH_OFFSET, y, &mut then_exits);

                let mut else_exits: OpenExits = vec![(id.clone(), else_label.clone())];
                let else_y = emit_flow(else_branch, builder, x + BRANCH_OFFSET, y, &mut else_exits);

                exits.extend(then_exits);
                exits.extend(else_exits);
                y = then_y.max(else_y);
            }
        }
    }
    y
}

fn activity_label(activity: &Activity) -> &str {
    match activity {
        Activity::Start => "Start",
        Activity::Stop => "Stop",
        Activity::Action { label } => label,
        Activity::Decision { condition, .. } => condition,
    }
}

fn connect_exits(builder: &mut GraphBuilder, exits: &mut OpenExits, target: &str) {
    for (source, label) in exits.drain(..) {
        builder.add_edge(
            &source,
            target,
            style::ARROW_TRANSITION,
            label.as_deref().unwrap_or(""),
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate;
    use pd_core::DiagramModel;

    fn action(label: &str) -> Activity {
        Activity::Action {
            label: label.to_string(),
        }
    }

    fn generated(flow: Vec<Activity>) -> crate::Generated {
        generate(&DiagramModel::Activity { flow })
    }

    #[test]
    fn linear_flow_chains_every_node() {
        let out = generated(vec![Activity::Start, action("A"), action("B"), Activity::Stop]);
        assert_eq!(out.document.nodes.len(), 4);
        assert_eq!(out.document.edges.len(), 3);

        let ys: Vec<i64> = out.document.nodes.iter().map(|n| n.y).collect();
        assert_eq!(ys, vec![Y_START, Y_START + Y_STEP, Y_START + 2 * Y_STEP, Y_START + 3 * Y_STEP]);
    }

    #[test]
    fn decision_branches_offset_and_rejoin() {
        let out = generated(vec![
            Activity::Start,
            Activity::Decision {
                condition: "ok?".to_string(),
                then_label: Some("yes".to_string()),
                else_label: Some("no".to_string()),
                then_branch: vec![action("Left")],
                else_branch: vec![action("Right")],
            },
            Activity::Stop,
        ]);

        // start, decision, two branch actions, stop
        assert_eq!(out.document.nodes.len(), 5);
        // start->decision, decision->left, decision->right, left->stop, right->stop
        assert_eq!(out.document.edges.len(), 5);

        let by_label = |label: &str| {
            out.document
                .nodes
                .iter()
                .find(|n| n.label == label)
                .unwrap_or_else(|| panic!("missing node {label}"))
        };
        assert_eq!(by_label("Left").x, X_CENTER - BRANCH_OFFSET);
        assert_eq!(by_label("Right").x, X_CENTER + BRANCH_OFFSET);
        assert_eq!(by_label("Left").y, by_label("Right").y);
    }

    #[test]
    fn branch_labels_land_on_branch_entry_edges() {
        let out = generated(vec![Activity::Decision {
            condition: "q?".to_string(),
            then_label: Some("yes".to_string()),
            else_label: Some("no".to_string()),
            then_branch: vec![action("A")],
            else_branch: vec![action("B")],
        }]);

        let labels: Vec<&str> = out.document.edges.iter().map(|e| e.label.as_str()).collect();
        assert!(labels.contains(&"yes"));
        assert!(labels.contains(&"no"));
    }

    #[test]
    fn empty_else_branch_passes_decision_through_to_rejoin() {
        let out = generated(vec![
            Activity::Decision {
                condition: "q?".to_string(),
                then_label: Some("yes".to_string()),
                else_label: Some("no".to_string()),
                then_branch: vec![action("A")],
                else_branch: Vec::new(),
            },
            Activity::Stop,
        ]);

        // decision, A, stop
        assert_eq!(out.document.nodes.len(), 3);
        // decision->A, A->stop, decision->stop (labelled "no")
        assert_eq!(out.document.edges.len(), 3);
        let pass_through = out
            .document
            .edges
            .iter()
            .find(|e| e.label == "no")
            .expect("pass-through edge");
        let stop = out
            .document
            .nodes
            .iter()
            .find(|n| n.label == "Stop")
            .expect("stop node");
        assert_eq!(pass_through.target, stop.id);
    }

    #[test]
    fn rejoin_sits_below_the_longer_branch() {
        let out = generated(vec![
            Activity::Decision {
                condition: "q?".to_string(),
                then_label: None,
                else_label: None,
                then_branch: vec![action("A"), action("B")],
                else_branch: vec![action("C")],
            },
            Activity::Stop,
        ]);
        let stop = out
            .document
            .nodes
            .iter()
            .find(|n| n.label == "Stop")
            .expect("stop node");
        let b = out
            .document
            .nodes
            .iter()
            .find(|n| n.label == "B")
            .expect("deepest branch node");
        assert!(stop.y > b.y);
    }

    #[test]
    fn empty_flow_yields_empty_document() {
        let out = generated(Vec::new());
        assert!(out.document.nodes.is_empty());
        assert!(out.document.edges.is_empty());
        assert_eq!(out.document.title, "Activity Diagram");
    }
}
