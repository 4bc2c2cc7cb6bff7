//! Integration tests for the editor session and its history

use std::collections::HashMap;

use futures_util::future::BoxFuture;
use void_asset::{
    AssetCategory, AssetError, FileContent, FileSource, PickedFile, ReadError, ReadMode, Uploaded,
};
use void_editor::*;
use void_script::{FieldPath, FieldValue};

const SPINNER: &str = r#"/* @fields
[
  { "name": "rpm", "type": "NUMBER", "default": 30, "options": { "min": 0, "max": 120 } },
  { "name": "texture", "type": "FILE" },
  { "name": "pivot", "type": "GAMEOBJECT" }
]
*/
export default class Spinner {}
"#;

/// In-memory file source keyed by file name.
struct MemorySource(HashMap<String, Vec<u8>>);

impl MemorySource {
    fn new(files: &[(&str, &[u8])]) -> Self {
        Self(
            files
                .iter()
                .map(|(name, bytes)| (name.to_string(), bytes.to_vec()))
                .collect(),
        )
    }
}

impl FileSource for MemorySource {
    fn read<'a>(
        &'a self,
        file: &'a PickedFile,
        mode: ReadMode,
    ) -> BoxFuture<'a, Result<FileContent, ReadError>> {
        Box::pin(async move {
            let bytes = self.0.get(&file.name).cloned().ok_or_else(|| ReadError::Io {
                name: file.name.clone(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })?;
            void_asset::reader::decode(&file.name, bytes, mode)
        })
    }
}

fn session(picker: QueuedPicker) -> EditorSession {
    let source = MemorySource::new(&[
        ("logo.png", b"\x89PNG"),
        ("spinner.js", SPINNER.as_bytes()),
        ("wheel.stl", b"solid wheel"),
    ]);
    EditorSession::new(EditorState::new(), source, picker)
}

fn picked(names: &[&str]) -> Vec<PickedFile> {
    names
        .iter()
        .map(|name| PickedFile::new(*name, format!("assets/{}", name)))
        .collect()
}

/// Everything undo/redo can observe.
fn snapshot(state: &EditorState) -> String {
    let mut out = String::new();
    for &category in AssetCategory::all() {
        out.push_str(&format!("{}={:?};", category, state.assets.names(category)));
    }
    let mut objects: Vec<_> = state.scene.iter().collect();
    objects.sort_by_key(|(id, _)| id.to_bits());
    for (id, obj) in objects {
        out.push_str(&format!("{}:{}", id, obj.name));
        for (name, binding) in obj.scripts() {
            out.push_str(&format!("[{} {:?}]", name, binding.get(&FieldPath::root("rpm"))));
        }
        out.push(';');
    }
    out
}

#[tokio::test]
async fn test_logo_scenario() {
    let mut session = session(QueuedPicker::new());

    let uploaded = session.upload(&picked(&["logo.png"])).await.unwrap();
    let Uploaded::One(logo) = uploaded else {
        panic!("single upload returns one asset");
    };
    assert_eq!(logo.category, AssetCategory::Textures);
    assert_eq!(
        session.state().assets.names(AssetCategory::Textures),
        ["logo.png".to_string()]
    );

    let state = session.state_mut();
    state.rename_asset("logo.png", "brand.png").unwrap();
    assert_eq!(state.assets.names(AssetCategory::Textures), ["brand.png".to_string()]);
    assert_eq!(state.assets.category_of("logo.png"), None);

    state.remove_asset("brand.png").unwrap();
    assert!(state.assets.names(AssetCategory::Textures).is_empty());
    assert!(state.assets.content("brand.png").is_none());
    assert!(state.assets.is_consistent());

    // Both edits come back in reverse order
    assert!(state.undo());
    assert_eq!(state.assets.names(AssetCategory::Textures), ["brand.png".to_string()]);
    assert!(state.undo());
    assert_eq!(state.assets.names(AssetCategory::Textures), ["logo.png".to_string()]);
    assert!(state.assets.is_consistent());
}

#[tokio::test]
async fn test_every_command_obeys_the_inverse_law() {
    let mut session = session(QueuedPicker::new());
    session
        .upload(&picked(&["logo.png", "spinner.js", "wheel.stl"]))
        .await
        .unwrap();

    let state = session.state_mut();
    let wheel = state.create_object("Wheel").unwrap();
    state.attach_script(wheel, "spinner.js").unwrap();

    let steps: Vec<Box<dyn Fn(&mut EditorState) -> CommandResult>> = vec![
        Box::new(|s: &mut EditorState| s.create_object("Axle").map(|_| ())),
        Box::new(move |s: &mut EditorState| s.duplicate_object(wheel).map(|_| ())),
        Box::new(move |s: &mut EditorState| s.set_field(wheel, "spinner.js", FieldPath::root("rpm"), 90.0.into())),
        Box::new(|s: &mut EditorState| s.rename_asset("wheel.stl", "rim.stl")),
        Box::new(|s: &mut EditorState| s.remove_asset("logo.png")),
        Box::new(|s: &mut EditorState| s.create_animation().map(|_| ())),
        Box::new(move |s: &mut EditorState| s.detach_script(wheel, "spinner.js")),
        Box::new(move |s: &mut EditorState| s.attach_script(wheel, "spinner.js")),
        Box::new(|s: &mut EditorState| {
            s.edit_file(
                "spinner.js",
                FileContent::Text(SPINNER.replace("\"default\": 30", "\"default\": 45")),
            )
        }),
        Box::new(move |s: &mut EditorState| s.destroy_object(wheel)),
    ];

    for (i, step) in steps.iter().enumerate() {
        let before = snapshot(state);
        step(state).unwrap_or_else(|e| panic!("step {} failed: {}", i, e));
        let after = snapshot(state);

        assert!(state.undo(), "step {} undo", i);
        assert_eq!(snapshot(state), before, "step {} undo state", i);
        assert!(state.redo(), "step {} redo", i);
        assert_eq!(snapshot(state), after, "step {} redo state", i);
        assert!(state.assets.is_consistent());
    }
}

#[test]
fn test_new_edit_discards_redo() {
    let mut state = EditorState::new();
    let first = state.create_object("First").unwrap();
    state.create_object("Second").unwrap();

    assert!(state.undo());
    assert!(state.undo());
    assert_eq!(state.history.redo_count(), 2);

    state.destroy_object(first).unwrap_err();
    assert_eq!(state.history.redo_count(), 2);

    state.create_object("Third").unwrap();
    assert!(!state.can_redo());
    assert!(!state.redo());
    assert_eq!(state.scene.len(), 1);
}

#[test]
fn test_history_depth_from_config() {
    let config = EditorConfig {
        history_depth: 3,
        ..EditorConfig::default()
    };
    let mut state = EditorState::with_config(config);
    for i in 0..5 {
        state.create_object(&format!("Object {}", i)).unwrap();
    }

    assert_eq!(state.history.undo_count(), 3);
    while state.undo() {}
    assert_eq!(state.scene.len(), 2);
}

#[test]
fn test_stale_object_fails_without_losing_history() {
    let mut state = EditorState::new();
    state
        .assets
        .insert("spinner.js", FileContent::Text(SPINNER.to_string()));
    let wheel = state.create_object("Wheel").unwrap();
    state.attach_script(wheel, "spinner.js").unwrap();
    state
        .set_field(wheel, "spinner.js", FieldPath::root("rpm"), 60.0.into())
        .unwrap();

    // Remove the object behind the history's back
    state.scene.remove(wheel).unwrap();

    assert!(!state.undo());
    assert_eq!(state.undo_description(), Some("Set Field"));
    assert_eq!(state.history.undo_count(), 3);
}

#[test]
fn test_destroyed_object_returns_after_later_creation() {
    let mut state = EditorState::new();
    let crate_id = state.create_object("Crate").unwrap();
    state.destroy_object(crate_id).unwrap();
    let barrel = state.create_object("Barrel").unwrap();
    assert_ne!(barrel.index(), crate_id.index());

    assert!(state.undo());
    assert!(state.undo());
    assert!(state.scene.contains(crate_id));
    assert!(!state.scene.contains(barrel));
    assert_eq!(state.scene.len(), 1);

    assert!(state.redo());
    assert!(state.redo());
    assert!(!state.scene.contains(crate_id));
    assert!(state.scene.contains(barrel));
}

#[test]
fn test_history_walks_back_and_forth_over_many_steps() {
    let mut state = EditorState::new();
    state
        .assets
        .insert("spinner.js", FileContent::Text(SPINNER.to_string()));
    let mut states = vec![snapshot(&state)];

    let wheel = state.create_object("Wheel").unwrap();
    states.push(snapshot(&state));
    state.attach_script(wheel, "spinner.js").unwrap();
    states.push(snapshot(&state));
    state
        .set_field(wheel, "spinner.js", FieldPath::root("rpm"), 75.0.into())
        .unwrap();
    states.push(snapshot(&state));
    let copy = state.duplicate_object(wheel).unwrap();
    states.push(snapshot(&state));
    state.destroy_object(wheel).unwrap();
    states.push(snapshot(&state));
    state.create_object("Axle").unwrap();
    states.push(snapshot(&state));
    state.destroy_object(copy).unwrap();
    states.push(snapshot(&state));
    state.create_object("Hub").unwrap();
    states.push(snapshot(&state));

    for (i, expected) in states.iter().enumerate().rev().skip(1) {
        assert!(state.undo(), "undo to state {}", i);
        assert_eq!(&snapshot(&state), expected, "state {}", i);
    }
    assert!(!state.undo());

    for (i, expected) in states.iter().enumerate().skip(1) {
        assert!(state.redo(), "redo to state {}", i);
        assert_eq!(&snapshot(&state), expected, "state {}", i);
    }
    assert!(!state.redo());
}

#[test]
fn test_rename_onto_a_still_bound_script_is_refused() {
    let mut state = EditorState::new();
    state.assets.insert("a.js", FileContent::Text(SPINNER.to_string()));
    state.assets.insert("b.js", FileContent::Text(SPINNER.to_string()));
    let wheel = state.create_object("Wheel").unwrap();
    state.attach_script(wheel, "a.js").unwrap();
    state.attach_script(wheel, "b.js").unwrap();
    state.remove_asset("b.js").unwrap();
    let depth = state.history.undo_count();

    let err = state.rename_asset("a.js", "b.js").unwrap_err();
    assert!(matches!(err, CommandError::Asset(AssetError::NameTaken(ref name)) if name == "b.js"));
    assert_eq!(state.history.undo_count(), depth);
    assert!(state.assets.contains("a.js"));
    assert_eq!(
        state.scene.get(wheel).unwrap().script_names(),
        ["a.js".to_string(), "b.js".to_string()]
    );

    // Once the stale binding is gone the rename goes through and undoes cleanly
    state.detach_script(wheel, "b.js").unwrap();
    state.rename_asset("a.js", "b.js").unwrap();
    assert_eq!(state.scene.get(wheel).unwrap().script_names(), ["b.js".to_string()]);
    assert!(state.undo());
    assert_eq!(state.scene.get(wheel).unwrap().script_names(), ["a.js".to_string()]);
}

#[test]
fn test_undo_remove_restores_selection() {
    let mut state = EditorState::new();
    state.assets.insert("logo.png", FileContent::Text("png".to_string()));
    state.assets.insert("spinner.js", FileContent::Text(SPINNER.to_string()));
    state.assets.select_file(Some("logo.png")).unwrap();

    state.remove_asset("logo.png").unwrap();
    assert_eq!(state.assets.current_file(), None);
    assert!(state.undo());
    assert_eq!(state.assets.current_file(), Some("logo.png"));

    // Removing another file also clears the selection, and undo brings it back
    state.remove_asset("spinner.js").unwrap();
    assert_eq!(state.assets.current_file(), None);
    assert!(state.undo());
    assert_eq!(state.assets.current_file(), Some("logo.png"));
}

#[tokio::test]
async fn test_failed_read_keeps_other_files() {
    let mut session = session(QueuedPicker::new());
    let err = session
        .upload(&picked(&["logo.png", "missing.gif", "wheel.stl"]))
        .await
        .unwrap_err();

    assert!(matches!(err, void_asset::AssetError::Read(ReadError::Io { ref name, .. }) if name == "missing.gif"));
    assert!(session.state().assets.contains("logo.png"));
    assert!(session.state().assets.contains("wheel.stl"));
}

#[tokio::test]
async fn test_import_cancel_is_not_an_error() {
    let mut session = session(QueuedPicker::with_responses([PickResponse::Cancel]));
    assert_eq!(session.import().await.unwrap(), None);
    assert!(session.state().assets.is_empty());
}

#[tokio::test]
async fn test_import_through_picker() {
    let picker = QueuedPicker::with_responses([PickResponse::Files(picked(&[
        "spinner.js",
        "wheel.stl",
    ]))]);
    let mut session = session(picker);

    let uploaded = session.import().await.unwrap().unwrap();
    assert_eq!(uploaded.names(), vec!["spinner.js", "wheel.stl"]);
    assert!(session.drain_events().contains(&SessionEvent::AssetsChanged));
}

#[tokio::test]
async fn test_pick_field_values() {
    let picker = QueuedPicker::new();
    let mut session = session(picker);
    session.upload(&picked(&["spinner.js"])).await.unwrap();

    let state = session.state_mut();
    let wheel = state.create_object("Wheel").unwrap();
    let hub = state.create_object("Hub").unwrap();
    state.attach_script(wheel, "spinner.js").unwrap();

    // Nothing queued: the dialog counts as dismissed
    let written = session
        .pick_field(wheel, "spinner.js", FieldPath::root("pivot"))
        .await
        .unwrap();
    assert!(!written);

    let mut session = EditorSession::new(
        std::mem::take(session.state_mut()),
        MemorySource::new(&[]),
        QueuedPicker::with_responses([
            PickResponse::Object(hub),
            PickResponse::Files(picked(&["logo.png"])),
        ]),
    );

    assert!(session
        .pick_field(wheel, "spinner.js", FieldPath::root("pivot"))
        .await
        .unwrap());
    assert!(session
        .pick_field(wheel, "spinner.js", FieldPath::root("texture"))
        .await
        .unwrap());

    let binding = session.state().scene.get(wheel).unwrap().script("spinner.js").unwrap();
    let pivot = binding.get(&FieldPath::root("pivot")).unwrap();
    assert_eq!(pivot.as_object().map(|o| (o.id, o.name.as_str())), Some((hub, "Hub")));
    assert_eq!(
        binding.get(&FieldPath::root("texture")),
        Some(FieldValue::String("assets/logo.png".into()))
    );

    let events = session.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        SessionEvent::FieldChanged(change) if change.object_id == Some(hub)
    )));

    let err = session
        .pick_field(wheel, "spinner.js", FieldPath::root("rpm"))
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Command(CommandError::InvalidOperation(_))));
}

#[test]
fn test_keyboard_shortcuts() {
    let mut session = EditorSession::new(
        EditorState::new(),
        MemorySource::new(&[]),
        QueuedPicker::new(),
    );
    let lamp = session.state_mut().create_object("Lamp").unwrap();
    session.state_mut().select_object(Some(lamp)).unwrap();
    session.drain_events();

    let chord = |s: &str| s.parse::<KeyChord>().unwrap();

    assert_eq!(session.handle_key(&chord("Ctrl+Shift+D")), Some(Shortcut::DuplicateObject));
    assert_eq!(session.state().scene.len(), 2);
    assert_eq!(session.drain_events(), vec![SessionEvent::RefreshTree]);

    assert_eq!(session.handle_key(&chord("F")), Some(Shortcut::FocusCamera));
    assert_eq!(session.drain_events(), vec![SessionEvent::FocusCamera(lamp)]);

    assert_eq!(session.handle_key(&chord("Ctrl+Z")), Some(Shortcut::Undo));
    assert_eq!(session.state().scene.len(), 1);
    assert_eq!(session.handle_key(&chord("Ctrl+Shift+Z")), Some(Shortcut::Redo));
    assert_eq!(session.state().scene.len(), 2);

    assert_eq!(session.handle_key(&chord("Ctrl+Q")), None);
}
