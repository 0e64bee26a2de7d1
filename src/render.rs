//! Plain-text rendering of the mission list and the detail panel.

use crate::models::{EditBuffer, Mission, MissionId};

const DONE: &str = "[x]";
const OPEN: &str = "[ ]";
const SELECTED: &str = ">";
const EDITING: &str = "*";
const NO_DESCRIPTION: &str = "No description.";

fn checkbox(completed: bool) -> &'static str {
    if completed {
        DONE
    } else {
        OPEN
    }
}

/// Render the list, newest first.
///
/// Example output:
/// ```text
/// 2 of 3 missions remaining
/// > [ ] Buy milk  (#1760000000000)
///   [x] Call mom  (#1759999999000)
/// * [ ] Install the app  (#1)
///       Add it to the home screen
/// ```
///
/// A mission being edited shows the edit buffer, with its description on the
/// following line.
pub fn render_list(
    missions: &[Mission],
    selected: Option<MissionId>,
    editing: Option<&EditBuffer>,
) -> String {
    let mut output = String::new();

    if missions.is_empty() {
        output.push_str("No missions yet.\n");
        return output;
    }

    let remaining = missions.iter().filter(|m| !m.is_completed).count();
    output.push_str(&format!(
        "{} of {} missions remaining\n",
        remaining,
        missions.len()
    ));

    for mission in missions {
        let edit = editing.filter(|e| e.id() == mission.id);
        let marker = if edit.is_some() {
            EDITING
        } else if selected == Some(mission.id) {
            SELECTED
        } else {
            " "
        };
        let title = edit.map_or(mission.task.as_str(), EditBuffer::title);

        output.push_str(&format!(
            "{} {} {}  (#{})\n",
            marker,
            checkbox(mission.is_completed),
            title,
            mission.id
        ));

        if let Some(edit) = edit {
            if !edit.description().is_empty() {
                output.push_str(&format!("      {}\n", edit.description()));
            }
        }
    }

    output
}

/// Render the detail panel for one mission.
pub fn render_detail(mission: &Mission) -> String {
    let description = if mission.description.is_empty() {
        NO_DESCRIPTION
    } else {
        mission.description.as_str()
    };

    format!(
        "{} {}\n\n{}\n",
        checkbox(mission.is_completed),
        mission.task,
        description
    )
}
