mod csv_ip_source;
mod csv_record_sink;
mod http_geo_resolver;

pub use csv_ip_source::CsvIpSource;
pub use csv_record_sink::CsvRecordSink;
pub use http_geo_resolver::{HttpGeoResolver, LookupFailure};
