mod server;

pub use send_test::send_test;
pub use server::serve;
