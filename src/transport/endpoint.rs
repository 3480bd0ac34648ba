//! Endpoint descriptors for the operations the inference server exposes.

/// HTTP method for an endpoint. The server only uses these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
    Head,
}

/// One logical operation: its path, method, and whether the response can be
/// streamed as newline-delimited records. Defined once, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub path: &'static str,
    pub method: Method,
    pub streamable: bool,
}

pub const CHAT: Endpoint = Endpoint {
    path: "/api/chat",
    method: Method::Post,
    streamable: true,
};

pub const GENERATE: Endpoint = Endpoint {
    path: "/api/generate",
    method: Method::Post,
    streamable: true,
};

pub const EMBED: Endpoint = Endpoint {
    path: "/api/embed",
    method: Method::Post,
    streamable: false,
};

pub const TAGS: Endpoint = Endpoint {
    path: "/api/tags",
    method: Method::Get,
    streamable: false,
};

pub const SHOW: Endpoint = Endpoint {
    path: "/api/show",
    method: Method::Post,
    streamable: false,
};

pub const COPY: Endpoint = Endpoint {
    path: "/api/copy",
    method: Method::Post,
    streamable: false,
};

pub const DELETE: Endpoint = Endpoint {
    path: "/api/delete",
    method: Method::Delete,
    streamable: false,
};

pub const PULL: Endpoint = Endpoint {
    path: "/api/pull",
    method: Method::Post,
    streamable: true,
};

pub const PS: Endpoint = Endpoint {
    path: "/api/ps",
    method: Method::Get,
    streamable: false,
};

pub const VERSION: Endpoint = Endpoint {
    path: "/api/version",
    method: Method::Get,
    streamable: false,
};
