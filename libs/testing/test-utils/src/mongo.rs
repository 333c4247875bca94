//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that creates a MongoDB container for testing.
//! Each test gets its own container; `database()` gives per-test databases on
//! top of that for extra isolation when a container is shared.

use mongodb::{Client, Database};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;
use uuid::Uuid;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    pub client: Client,
    pub connection_string: String,
}

impl TestMongo {
    /// Create a new MongoDB container and connect a client to it
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestMongo;
    ///
    /// # async fn example() {
    /// let mongo = TestMongo::new().await;
    /// let db = mongo.database("my_test");
    /// # }
    /// ```
    pub async fn new() -> Self {
        // Use Mongo 8 to match production
        let mongo = Mongo::default().with_tag("8.0");

        let container = mongo
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get host port");

        let connection_string = format!("mongodb://127.0.0.1:{}/", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to connect to test MongoDB");

        tracing::info!(port = host_port, "Test MongoDB ready (Mongo 8)");

        Self {
            container,
            client,
            connection_string,
        }
    }

    /// Get a cloned client (useful for passing to repositories)
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// Get a database by name
    ///
    /// Databases are created lazily on first write, so this is cheap.
    pub fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }

    /// Get a uniquely named database (for parallel test isolation)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestMongo;
    ///
    /// # async fn example() {
    /// let mongo = TestMongo::new().await;
    /// let db = mongo.unique_database("users");
    /// # }
    /// ```
    pub fn unique_database(&self, prefix: &str) -> Database {
        let name = format!("{}_{}", prefix, Uuid::new_v4().simple());
        self.client.database(&name)
    }
}

// Container is automatically cleaned up when TestMongo is dropped
impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}
