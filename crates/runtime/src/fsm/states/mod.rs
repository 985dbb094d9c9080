//! The six state handlers.

mod collaborate;
mod combat;
mod flee;
mod idle;
mod investigate;
mod patrol;

pub use collaborate::CollaborateState;
pub use combat::CombatState;
pub use flee::FleeState;
pub use idle::IdleState;
pub use investigate::InvestigateState;
pub use patrol::PatrolState;
