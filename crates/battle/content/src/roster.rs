//! Resolved unit templates addressable by id.

use battle_core::{CombatUnit, UnitTemplate};

/// Unit templates in authoring order.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    units: Vec<(String, UnitTemplate)>,
}

impl Roster {
    pub fn new(units: Vec<(String, UnitTemplate)>) -> Self {
        Self { units }
    }

    pub fn get(&self, id: &str) -> Option<&UnitTemplate> {
        self.units
            .iter()
            .find(|(unit_id, _)| unit_id == id)
            .map(|(_, template)| template)
    }

    /// Builds a fresh combat unit from the template registered as `id`.
    pub fn spawn(&self, id: &str) -> Option<CombatUnit> {
        self.get(id).cloned().map(CombatUnit::from_template)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_builds_from_the_named_template() {
        let roster = Roster::new(vec![
            ("hero".into(), UnitTemplate::new("Hero")),
            ("slime".into(), UnitTemplate::new("Slime").with_level(3)),
        ]);

        let slime = roster.spawn("slime").unwrap();
        assert_eq!(slime.name(), "Slime");
        assert_eq!(slime.level(), 3);
        assert!(roster.spawn("dragon").is_none());
        assert_eq!(roster.ids().collect::<Vec<_>>(), ["hero", "slime"]);
    }
}
