use crate::entity::Entity;

/// A named set of related entities owned by a parent entity (for example
/// the attendees of a meeting).
///
/// Membership is keyed by id. Entities without an id have not been saved
/// yet; any number of them can be added.
#[derive(Debug, Clone, Default)]
pub struct MemberEntities {
    members: Vec<Entity>,
}

impl MemberEntities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member. Returns false if a member with the same id exists.
    pub fn add(&mut self, entity: Entity) -> bool {
        if let Some(id) = entity.id() {
            if self.get(id).is_some() {
                return false;
            }
        }
        self.members.push(entity);
        true
    }

    /// Removes the member with `id`. Returns whether one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.id() != Some(id));
        self.members.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.members.iter().find(|m| m.id() == Some(id))
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.members.iter_mut().find(|m| m.id() == Some(id))
    }

    /// Members added since the last save (no id yet).
    pub fn new_members(&self) -> impl Iterator<Item = &Entity> {
        self.members.iter().filter(|m| m.is_new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.members.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'a> IntoIterator for &'a MemberEntities {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
