pub mod set;
pub mod sorted_set;

use std::fmt;

pub use set::PlainSet;
pub use sorted_set::OrderedSet;

/// The value held under a key.
#[derive(Debug, Clone)]
pub enum Container {
    SortedSet(OrderedSet),
    Set(PlainSet),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    SortedSet,
    Set,
}

impl ContainerKind {
    pub fn type_name(self) -> &'static str {
        match self {
            ContainerKind::SortedSet => "zset",
            ContainerKind::Set => "set",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl Container {
    pub fn kind(&self) -> ContainerKind {
        match self {
            Container::SortedSet(_) => ContainerKind::SortedSet,
            Container::Set(_) => ContainerKind::Set,
        }
    }

    pub fn as_sorted_set(&self) -> Option<&OrderedSet> {
        match self {
            Container::SortedSet(z) => Some(z),
            _ => None,
        }
    }

    pub fn as_sorted_set_mut(&mut self) -> Option<&mut OrderedSet> {
        match self {
            Container::SortedSet(z) => Some(z),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&PlainSet> {
        match self {
            Container::Set(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_set_mut(&mut self) -> Option<&mut PlainSet> {
        match self {
            Container::Set(s) => Some(s),
            _ => None,
        }
    }
}

/// A container type that can live in the namespace.
pub trait Stored: Clone + Default {
    const KIND: ContainerKind;

    fn from_container(container: &Container) -> Option<&Self>;
    fn from_container_mut(container: &mut Container) -> Option<&mut Self>;
    fn into_container(self) -> Container;
}

impl Stored for OrderedSet {
    const KIND: ContainerKind = ContainerKind::SortedSet;

    fn from_container(container: &Container) -> Option<&Self> {
        container.as_sorted_set()
    }

    fn from_container_mut(container: &mut Container) -> Option<&mut Self> {
        container.as_sorted_set_mut()
    }

    fn into_container(self) -> Container {
        Container::SortedSet(self)
    }
}

impl Stored for PlainSet {
    const KIND: ContainerKind = ContainerKind::Set;

    fn from_container(container: &Container) -> Option<&Self> {
        container.as_set()
    }

    fn from_container_mut(container: &mut Container) -> Option<&mut Self> {
        container.as_set_mut()
    }

    fn into_container(self) -> Container {
        Container::Set(self)
    }
}
