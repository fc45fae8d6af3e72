use crate::descriptor::MethodDescriptor;
use crate::marshal::RemoteHandler;
use http::Method;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use xxhash_rust::const_xxh3::xxh3_64 as const_xxh3_64;

/// Deterministic 64-bit identifier of a method name.
pub const fn method_id_hash(name: &str) -> u64 {
    const_xxh3_64(name.as_bytes())
}

/// Compile-time method ID.
///
/// ```rust
/// use remoting::method_id;
/// const ADD: u64 = method_id!("math.add");
/// assert_eq!(ADD, remoting::method_id_hash("math.add"));
/// ```
#[macro_export]
macro_rules! method_id {
    ($name:literal) => {{
        const ID: u64 = $crate::method_id_hash($name);
        ID
    }};
}

/// A registered method: its descriptor and the target it dispatches to.
#[derive(Clone)]
pub struct RemoteMethod {
    pub id: u64,
    pub descriptor: MethodDescriptor,
    pub handler: RemoteHandler,
}

impl std::fmt::Debug for RemoteMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteMethod")
            .field("id", &self.id)
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("a method named {name:?} is already registered")]
    AlreadyRegistered { name: String },

    #[error("method {name:?} hashes to ID {id:#x}, already taken by {existing:?}")]
    IdCollision {
        name: String,
        id: u64,
        existing: String,
    },
}

/// Methods by name and ID.
///
/// Populated during setup; once handed to the engine it is only read.
#[derive(Debug, Default, Clone)]
pub struct MethodRegistry {
    methods: HashMap<u64, RemoteMethod>,
    name_to_id: HashMap<String, u64>,
    order: Vec<u64>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        descriptor: MethodDescriptor,
        handler: RemoteHandler,
    ) -> Result<u64, RegistryError> {
        let name = descriptor.name().to_string();
        if self.name_to_id.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered { name });
        }

        let id = method_id_hash(&name);
        match self.methods.entry(id) {
            Entry::Occupied(entry) => Err(RegistryError::IdCollision {
                name,
                id,
                existing: entry.get().descriptor.name().to_string(),
            }),
            Entry::Vacant(entry) => {
                tracing::debug!(method = %name, id, path = %descriptor.http().path, "registered remote method");
                entry.insert(RemoteMethod {
                    id,
                    descriptor,
                    handler,
                });
                self.name_to_id.insert(name, id);
                self.order.push(id);
                Ok(id)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&RemoteMethod> {
        self.name_to_id
            .get(name)
            .and_then(|id| self.methods.get(id))
    }

    pub fn get_by_id(&self, id: u64) -> Option<&RemoteMethod> {
        self.methods.get(&id)
    }

    /// Finds the method bound to `verb` + `path`, returning the captured
    /// path parameters. Registration order breaks ties.
    pub fn route(&self, verb: &Method, path: &str) -> Option<(&RemoteMethod, HashMap<String, String>)> {
        self.iter().find_map(|method| {
            let route = method.descriptor.http();
            if !route.accepts_verb(verb) {
                return None;
            }
            route.path.matches(path).map(|params| (method, params))
        })
    }

    /// Methods in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RemoteMethod> {
        self.order.iter().filter_map(|id| self.methods.get(id))
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
