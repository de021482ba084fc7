//! Player-side collaborator the camera reads and writes each frame

/// Flags the camera needs from the player it follows
pub trait PlayerHandle {
    /// Whether the player currently accepts movement input
    fn movement_enabled(&self) -> bool;

    /// Hand movement back to the player or take it away (first person)
    fn set_movement_enabled(&mut self, enabled: bool);

    /// While true the camera does not update at all
    fn inventory_open(&self) -> bool {
        false
    }
}

/// Plain flag storage for a player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerFlags {
    /// Movement input accepted
    pub can_move: bool,
    /// Inventory screen shown
    pub show_inventory: bool,
}

impl Default for PlayerFlags {
    fn default() -> Self {
        Self {
            can_move: true,
            show_inventory: false,
        }
    }
}

impl PlayerHandle for PlayerFlags {
    fn movement_enabled(&self) -> bool {
        self.can_move
    }

    fn set_movement_enabled(&mut self, enabled: bool) {
        self.can_move = enabled;
    }

    fn inventory_open(&self) -> bool {
        self.show_inventory
    }
}
