pub mod collection;
pub mod maturity;
pub mod suspension;
pub mod types;

#[cfg(test)]
pub(crate) mod fixture;

pub use collection::{
    CardStore,
    Collection,
    CollectionTx,
};
pub use maturity::{
    MaturityClassifier,
    MaturityReport,
};
pub use suspension::{
    SuspensionEngine,
    Transition,
};
pub use types::{
    Card,
    FieldDef,
    Model,
    Note,
    QueueState,
    Review,
};
