/// Records the backend identifies by an integer primary key.
///
/// List pages use it to splice updated rows and drop deleted ones.
pub trait Record {
    fn record_id(&self) -> i64;
}
