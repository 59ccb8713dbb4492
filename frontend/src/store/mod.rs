mod http;

pub use http::HttpDocumentStore;
