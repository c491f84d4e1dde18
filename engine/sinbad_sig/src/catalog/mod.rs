//! Type catalog: which constructors a target type exposes.
//!
//! The resolver never inspects types directly. It asks a [`TypeCatalog`] for
//! the constructors of a target type, in declaration order, and matches
//! signatures against their parameter shapes. [`TypeRegistry`] is the
//! in-memory catalog that binding layers populate at startup.
//!
//! # Design
//!
//! - Constructors keep their declaration index; overloads are resolved by
//!   declaration order, so the order types are registered in matters.
//! - `FxHashMap` for O(1) lookup by name, plus a `Vec` of names for
//!   deterministic iteration in registration order.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{Shape, TypeName};

/// A declared constructor parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: String,
    pub shape: Shape,
}

impl Param {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Param {
            name: name.into(),
            shape,
        }
    }

    /// Parameter without a declared name, named `arg{index}`.
    pub fn positional(index: usize, shape: Shape) -> Self {
        Param {
            name: format!("arg{index}"),
            shape,
        }
    }
}

/// One constructor of a target type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Constructor {
    index: usize,
    params: Vec<Param>,
}

impl Constructor {
    /// Position among the type's constructors, in declaration order.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param.shape)?;
        }
        f.write_str(")")
    }
}

/// Handle naming one constructor of one type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConstructorRef {
    pub target: TypeName,
    pub index: usize,
}

impl fmt::Display for ConstructorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.target, self.index)
    }
}

/// A target type and its constructors.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeDescriptor {
    name: TypeName,
    constructors: Vec<Constructor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<TypeName>) -> Self {
        TypeDescriptor {
            name: name.into(),
            constructors: Vec::new(),
        }
    }

    /// Declare the next constructor.
    #[must_use]
    pub fn constructor(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        let index = self.constructors.len();
        self.constructors.push(Constructor {
            index,
            params: params.into_iter().collect(),
        });
        self
    }

    /// Declare the next constructor from parameter shapes alone.
    #[must_use]
    pub fn positional(self, shapes: impl IntoIterator<Item = Shape>) -> Self {
        let params: Vec<Param> = shapes
            .into_iter()
            .enumerate()
            .map(|(i, shape)| Param::positional(i, shape))
            .collect();
        self.constructor(params)
    }

    #[inline]
    pub fn name(&self) -> &TypeName {
        &self.name
    }

    #[inline]
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }
}

/// Source of constructor metadata.
///
/// The resolver calls [`constructors`](TypeCatalog::constructors) once per
/// uncached resolution; implementations may count or trace those calls.
pub trait TypeCatalog {
    /// Constructors of `ty` in declaration order, or `None` if `ty` is not
    /// known to this catalog.
    fn constructors(&self, ty: &TypeName) -> Option<&[Constructor]>;
}

impl<C: TypeCatalog + ?Sized> TypeCatalog for &C {
    fn constructors(&self, ty: &TypeName) -> Option<&[Constructor]> {
        (**self).constructors(ty)
    }
}

impl<C: TypeCatalog + ?Sized> TypeCatalog for Arc<C> {
    fn constructors(&self, ty: &TypeName) -> Option<&[Constructor]> {
        (**self).constructors(ty)
    }
}

/// In-memory catalog of target types.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    /// Types indexed by name.
    types: FxHashMap<TypeName, TypeDescriptor>,

    /// Names in first-registration order.
    order: Vec<TypeName>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, replacing any earlier descriptor with the same name.
    ///
    /// Returns the replaced descriptor. A replaced type keeps its original
    /// position in iteration order.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Option<TypeDescriptor> {
        tracing::debug!(
            ty = %descriptor.name,
            constructors = descriptor.constructors.len(),
            "registering type"
        );

        let name = descriptor.name.clone();
        let previous = self.types.insert(name.clone(), descriptor);
        if previous.is_none() {
            self.order.push(name);
        }
        previous
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered descriptors in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.order.iter().filter_map(|name| self.types.get(name))
    }
}

impl TypeCatalog for TypeRegistry {
    fn constructors(&self, ty: &TypeName) -> Option<&[Constructor]> {
        self.types.get(ty).map(TypeDescriptor::constructors)
    }
}
