use sediment_protocol::{ObjectPath, SEDIMENTD_BUS_NAME};

/// Bus name and root path prefix identifying a daemon endpoint.
///
/// Supplied by the caller or configuration; this layer never derives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    bus_name: String,
    root: ObjectPath,
}

impl ServiceIdentity {
    pub fn new(bus_name: impl Into<String>, root: ObjectPath) -> Self {
        Self {
            bus_name: bus_name.into(),
            root,
        }
    }

    /// Identity of the sedimentd daemon endpoint.
    pub fn sedimentd() -> Self {
        let root = ObjectPath::new("/org/sediment").expect("static object path");
        Self::new(SEDIMENTD_BUS_NAME, root)
    }

    pub fn bus_name(&self) -> &str {
        &self.bus_name
    }

    pub fn root(&self) -> &ObjectPath {
        &self.root
    }

    /// Bind this identity and `path` into a proxy.
    ///
    /// Infallible and free of I/O. Whether a remote object lives at `path`
    /// right now is a question for invocation time, never for resolution.
    pub fn resolve(&self, path: ObjectPath) -> Proxy {
        Proxy {
            identity: self.clone(),
            path,
        }
    }
}

/// Local handle for a remote object at one path on one endpoint.
///
/// Plain data: stateless, cheaply cloneable, safe to share between
/// concurrent callers, and valid whether or not the remote object exists.
/// Proxies cache nothing; discard and re-resolve at will.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proxy {
    identity: ServiceIdentity,
    path: ObjectPath,
}

impl Proxy {
    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    pub fn path(&self) -> &ObjectPath {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_binds_identity_and_path() {
        let identity = ServiceIdentity::sedimentd();
        let path = ObjectPath::new("/org/sediment/Manager").unwrap();
        let proxy = identity.resolve(path.clone());
        assert_eq!(proxy.identity(), &identity);
        assert_eq!(proxy.path(), &path);
    }

    #[test]
    fn resolve_never_checks_existence() {
        let identity = ServiceIdentity::sedimentd();
        let path = ObjectPath::new("/this/is/not/an/object/path").unwrap();
        let proxy = identity.resolve(path);
        assert_eq!(proxy.path().as_str(), "/this/is/not/an/object/path");
    }

    #[test]
    fn repeated_resolution_is_interchangeable() {
        let identity = ServiceIdentity::sedimentd();
        let path = ObjectPath::new("/org/sediment/Manager").unwrap();
        let a = identity.resolve(path.clone());
        let b = identity.resolve(path);
        assert_eq!(a, b);
    }

    #[test]
    fn sedimentd_identity_defaults() {
        let identity = ServiceIdentity::sedimentd();
        assert_eq!(identity.bus_name(), SEDIMENTD_BUS_NAME);
        assert_eq!(identity.root().as_str(), "/org/sediment");
    }
}
