pub mod damage;
pub mod events;
pub mod order;
pub mod outcome;
pub mod resolver;

pub use damage::compute_damage;
pub use events::CombatEvent;
pub use order::{action_order, Side, Slot};
pub use outcome::{BattleStatus, CombatOutcome};
pub use resolver::CombatResolver;
