//! Process-wide registry of optional and outcome shapes.
//!
//! A shape records the monomorphized accessors for one closed instantiation
//! so that erased callers holding only a `&dyn Any` or a `TypeId` can inspect
//! and build values. Shapes are leaked on first registration and never
//! evicted; lookups take the read lock and registration performs a single
//! insert-if-absent under the write lock.

use std::{
    any::{self, Any, TypeId},
    collections::HashMap,
    fmt,
    sync::LazyLock,
};

use parking_lot::RwLock;

use super::{AnyOptional, AnyOutcome};
use crate::{ContractError, Optional, Outcome};

type Erased = Box<dyn Any + Send>;

/// Accessors for one `Optional<T>` instantiation.
pub struct OptionalShape {
    type_name: &'static str,
    payload_type: TypeId,
    payload_name: &'static str,
    view: fn(&dyn Any) -> Option<&dyn AnyOptional>,
    absent: fn() -> Erased,
    present: fn(Erased) -> Result<Erased, ContractError>,
}

impl OptionalShape {
    fn of<T: Any + Send>() -> Self {
        Self {
            type_name: any::type_name::<Optional<T>>(),
            payload_type: TypeId::of::<T>(),
            payload_name: any::type_name::<T>(),
            view: view_optional::<T>,
            absent: absent_optional::<T>,
            present: present_optional::<T>,
        }
    }

    /// Name of the `Optional<T>` type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `TypeId` of the payload `T`.
    #[must_use]
    pub const fn payload_type(&self) -> TypeId {
        self.payload_type
    }

    /// Name of the payload type `T`.
    #[must_use]
    pub const fn payload_name(&self) -> &'static str {
        self.payload_name
    }

    pub(crate) fn view<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn AnyOptional> {
        (self.view)(value)
    }

    pub(crate) fn make_absent(&self) -> Erased {
        (self.absent)()
    }

    pub(crate) fn make_present(&self, payload: Erased) -> Result<Erased, ContractError> {
        (self.present)(payload)
    }
}

impl fmt::Debug for OptionalShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalShape")
            .field("type_name", &self.type_name)
            .field("payload_name", &self.payload_name)
            .finish_non_exhaustive()
    }
}

/// Accessors for one `Outcome<T>` instantiation.
pub struct OutcomeShape {
    type_name: &'static str,
    payload_name: &'static str,
    carries_payload: bool,
    view: fn(&dyn Any) -> Option<&dyn AnyOutcome>,
}

impl OutcomeShape {
    fn of<T: Any>() -> Self {
        Self {
            type_name: any::type_name::<Outcome<T>>(),
            payload_name: any::type_name::<T>(),
            carries_payload: TypeId::of::<T>() != TypeId::of::<()>(),
            view: view_outcome::<T>,
        }
    }

    /// Name of the `Outcome<T>` type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Name of the payload type `T`.
    #[must_use]
    pub const fn payload_name(&self) -> &'static str {
        self.payload_name
    }

    /// Whether `T` is anything other than `()`.
    #[must_use]
    pub const fn carries_payload(&self) -> bool {
        self.carries_payload
    }

    pub(crate) fn view<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn AnyOutcome> {
        (self.view)(value)
    }
}

impl fmt::Debug for OutcomeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutcomeShape")
            .field("type_name", &self.type_name)
            .field("carries_payload", &self.carries_payload)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct Registry {
    optionals: HashMap<TypeId, &'static OptionalShape>,
    by_payload: HashMap<TypeId, &'static OptionalShape>,
    outcomes: HashMap<TypeId, &'static OutcomeShape>,
}

static REGISTRY: LazyLock<RwLock<Registry>> = LazyLock::new(RwLock::default);

/// Shape of `Optional<T>`, registering it on first use.
#[must_use]
pub fn optional<T: Any + Send>() -> &'static OptionalShape {
    let id = TypeId::of::<Optional<T>>();
    let found = REGISTRY.read().optionals.get(&id).copied();
    if let Some(shape) = found {
        return shape;
    }
    let mut registry = REGISTRY.write();
    let shape = *registry.optionals.entry(id).or_insert_with(|| {
        let shape: &'static OptionalShape = Box::leak(Box::new(OptionalShape::of::<T>()));
        tracing::debug!(shape = shape.type_name, "registered optional shape");
        shape
    });
    registry
        .by_payload
        .entry(shape.payload_type)
        .or_insert(shape);
    shape
}

/// Shape of `Outcome<T>`, registering it on first use.
#[must_use]
pub fn outcome<T: Any>() -> &'static OutcomeShape {
    let id = TypeId::of::<Outcome<T>>();
    let found = REGISTRY.read().outcomes.get(&id).copied();
    if let Some(shape) = found {
        return shape;
    }
    *REGISTRY.write().outcomes.entry(id).or_insert_with(|| {
        let shape: &'static OutcomeShape = Box::leak(Box::new(OutcomeShape::of::<T>()));
        tracing::debug!(
            shape = shape.type_name,
            carries_payload = shape.carries_payload,
            "registered outcome shape"
        );
        shape
    })
}

/// Registered shape for the `Optional` type identified by `type_id`.
#[must_use]
pub fn optional_shape(type_id: TypeId) -> Option<&'static OptionalShape> {
    REGISTRY.read().optionals.get(&type_id).copied()
}

/// Registered `Optional` shape whose payload type is `payload`.
#[must_use]
pub fn shape_for_payload(payload: TypeId) -> Option<&'static OptionalShape> {
    REGISTRY.read().by_payload.get(&payload).copied()
}

/// Registered shape for the `Outcome` type identified by `type_id`.
#[must_use]
pub fn outcome_shape(type_id: TypeId) -> Option<&'static OutcomeShape> {
    REGISTRY.read().outcomes.get(&type_id).copied()
}

fn view_optional<T: Any>(value: &dyn Any) -> Option<&dyn AnyOptional> {
    value
        .downcast_ref::<Optional<T>>()
        .map(|optional| optional as &dyn AnyOptional)
}

fn view_outcome<T: Any>(value: &dyn Any) -> Option<&dyn AnyOutcome> {
    value
        .downcast_ref::<Outcome<T>>()
        .map(|outcome| outcome as &dyn AnyOutcome)
}

fn absent_optional<T: Any + Send>() -> Erased {
    Box::new(Optional::<T>::Absent)
}

fn present_optional<T: Any + Send>(payload: Erased) -> Result<Erased, ContractError> {
    payload
        .downcast::<T>()
        .map(|value| Box::new(Optional::Present(*value)) as Erased)
        .map_err(|_| ContractError::PayloadMismatch {
            expected: any::type_name::<T>(),
        })
}
