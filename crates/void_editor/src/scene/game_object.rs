//! Game objects and the scene arena.

use std::collections::BTreeMap;

use void_core::{Arena, ObjectId};
use void_script::{ObjectRef, ScriptBinding};

/// An object in the scene with its attached scripts.
#[derive(Clone, Debug)]
pub struct GameObject {
    pub name: String,
    /// Bindings keyed by script file name
    scripts: BTreeMap<String, ScriptBinding>,
}

impl GameObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scripts: BTreeMap::new(),
        }
    }

    pub fn scripts(&self) -> impl Iterator<Item = (&str, &ScriptBinding)> {
        self.scripts.iter().map(|(name, binding)| (name.as_str(), binding))
    }

    pub fn script_names(&self) -> Vec<String> {
        self.scripts.keys().cloned().collect()
    }

    pub fn script(&self, name: &str) -> Option<&ScriptBinding> {
        self.scripts.get(name)
    }

    pub fn script_mut(&mut self, name: &str) -> Option<&mut ScriptBinding> {
        self.scripts.get_mut(name)
    }

    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    /// Attach a binding under its script name, returning the one it replaces.
    pub fn attach(&mut self, binding: ScriptBinding) -> Option<ScriptBinding> {
        self.scripts.insert(binding.source_name().to_string(), binding)
    }

    pub fn detach(&mut self, name: &str) -> Option<ScriptBinding> {
        self.scripts.remove(name)
    }
}

/// All game objects of the open scene.
///
/// Slots are never reused, so an object removed by any command in the edit
/// history can be put back under its id.
pub struct Scene {
    objects: Arena<GameObject>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            objects: Arena::append_only(),
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty object.
    pub fn spawn(&mut self, name: impl Into<String>) -> ObjectId {
        let name = name.into();
        let id = self.objects.insert(GameObject::new(name.clone()));
        log::debug!("Spawned {} as {}", name, id);
        id
    }

    /// Add a copy of `source` under a new id, rebinding its scripts.
    pub fn insert_copy(&mut self, source: &GameObject, name: impl Into<String>) -> ObjectId {
        let id = self.objects.insert(GameObject::new(name));
        if let Some(copy) = self.objects.get_mut(id) {
            for binding in source.scripts.values() {
                copy.attach(binding.duplicate_for(id));
            }
        }
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains(id)
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<GameObject> {
        self.objects.remove(id)
    }

    /// Put a removed object back under its old id.
    pub fn restore(&mut self, id: ObjectId, object: GameObject) -> Result<(), GameObject> {
        self.objects.restore(id, object)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &GameObject)> {
        self.objects.iter()
    }

    /// Reference to an object for a game object field.
    pub fn object_ref(&self, id: ObjectId) -> Option<ObjectRef> {
        self.get(id).map(|obj| ObjectRef::new(id, obj.name.clone()))
    }

    /// Objects holding a binding of `script`.
    pub fn objects_with_script(&self, script: &str) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, obj)| obj.has_script(script))
            .map(|(id, _)| id)
            .collect()
    }

    /// Re-key bindings after a script file was renamed.
    ///
    /// Returns the number of objects touched.
    pub fn rename_script(&mut self, old_name: &str, new_name: &str) -> usize {
        let mut touched = 0;
        for (_, obj) in self.objects.iter_mut() {
            let Some(binding) = obj.scripts.remove(old_name) else {
                continue;
            };
            obj.scripts.insert(new_name.to_string(), binding.renamed(new_name));
            touched += 1;
        }
        touched
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use void_script::{FieldKind, FieldPath, FieldSpec, PropertyTable};

    fn binding(name: &str, target: ObjectId) -> ScriptBinding {
        let fields = vec![FieldSpec::new("speed", FieldKind::Number)];
        ScriptBinding::new(name, target, Box::new(PropertyTable::new(fields, target)))
    }

    #[test]
    fn test_attach_replaces_same_name() {
        let mut scene = Scene::new();
        let id = scene.spawn("Player");
        let obj = scene.get_mut(id).unwrap();

        assert!(obj.attach(binding("move.js", id)).is_none());
        assert!(obj.attach(binding("move.js", id)).is_some());
        assert_eq!(obj.script_names(), vec!["move.js".to_string()]);
    }

    #[test]
    fn test_copy_rebinds_scripts() {
        let mut scene = Scene::new();
        let id = scene.spawn("Player");
        scene.get_mut(id).unwrap().attach(binding("move.js", id));

        let source = scene.get(id).unwrap().clone();
        let copy = scene.insert_copy(&source, "Player (Copy)");

        let copied = scene.get(copy).unwrap().script("move.js").unwrap();
        assert_eq!(copied.target(), copy);
        assert_eq!(scene.objects_with_script("move.js").len(), 2);
    }

    #[test]
    fn test_restore_after_remove() {
        let mut scene = Scene::new();
        let id = scene.spawn("Crate");
        let removed = scene.remove(id).unwrap();
        assert!(!scene.contains(id));

        scene.restore(id, removed).unwrap();
        assert_eq!(scene.get(id).unwrap().name, "Crate");
    }

    #[test]
    fn test_rename_script() {
        let mut scene = Scene::new();
        let id = scene.spawn("Player");
        scene.get_mut(id).unwrap().attach(binding("move.js", id));
        scene
            .get_mut(id)
            .unwrap()
            .script_mut("move.js")
            .unwrap()
            .set(&FieldPath::root("speed"), 3.0.into())
            .unwrap();

        assert_eq!(scene.rename_script("move.js", "walk.js"), 1);
        let obj = scene.get(id).unwrap();
        assert!(!obj.has_script("move.js"));
        let walk = obj.script("walk.js").unwrap();
        assert_eq!(walk.source_name(), "walk.js");
        assert_eq!(walk.get(&FieldPath::root("speed")), Some(3.0.into()));
    }
}
