mod geo_resolver;
mod ip_source;
mod record_sink;

pub use geo_resolver::GeoResolver;
pub use ip_source::IpSource;
pub use record_sink::RecordSink;
