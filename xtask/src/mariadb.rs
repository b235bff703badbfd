// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ephemeral `MariaDB` containers for backend validation.

use std::{thread::sleep, time::Duration};

use color_eyre::{Result, eyre::Context, eyre::eyre};
use duct::cmd;

use crate::ExpressionExt;

const IMAGE: &str = "mariadb:11";
const USER: &str = "d8tl";
const READY_ATTEMPTS: u32 = 30;

/// A running `MariaDB` container. Stopped and removed on drop.
pub struct MariaDbContainer {
    name: &'static str,
    database: &'static str,
    password: &'static str,
    port: u16,
}

impl MariaDbContainer {
    /// Starts a fresh container and blocks until it accepts connections.
    ///
    /// Any container left behind under the same name by an earlier run is
    /// removed first.
    ///
    /// # Errors
    ///
    /// Fails if Docker is unavailable, the container cannot be started, or
    /// the server is not ready within the timeout.
    pub fn start(
        name: &'static str,
        database: &'static str,
        password: &'static str,
        port: u16,
    ) -> Result<Self> {
        tracing::info!("Checking Docker availability");
        cmd!("docker", "--version")
            .run_with_trace()
            .wrap_err("Docker is not available. Please install Docker.")?;

        let container = Self {
            name,
            database,
            password,
            port,
        };
        container.remove();

        tracing::info!(container = name, port, "Starting MariaDB container");
        cmd!(
            "docker",
            "run",
            "--name",
            name,
            "-e",
            format!("MARIADB_DATABASE={database}"),
            "-e",
            format!("MARIADB_USER={USER}"),
            "-e",
            format!("MARIADB_PASSWORD={password}"),
            "-e",
            "MARIADB_ROOT_PASSWORD=root_password",
            "-p",
            format!("{port}:3306"),
            "-d",
            IMAGE
        )
        .run_with_trace()
        .wrap_err("Failed to start MariaDB container")?;

        // From here on the guard owns cleanup, including on the error path.
        container.wait_until_ready()?;
        Ok(container)
    }

    /// Connection URL for the provisioned database.
    pub fn database_url(&self) -> String {
        format!(
            "mysql://{USER}:{}@127.0.0.1:{}/{}",
            self.password, self.port, self.database
        )
    }

    pub const fn database(&self) -> &'static str {
        self.database
    }

    fn wait_until_ready(&self) -> Result<()> {
        tracing::info!("Waiting for MariaDB to be ready...");
        for attempt in 1..=READY_ATTEMPTS {
            sleep(Duration::from_secs(1));
            tracing::debug!("Connection attempt {attempt}/{READY_ATTEMPTS}");

            let ping = cmd!(
                "docker",
                "exec",
                self.name,
                "mariadb",
                "-u",
                USER,
                format!("-p{}", self.password),
                "-e",
                "SELECT 1"
            )
            .stdout_null()
            .stderr_null()
            .run();

            if ping.is_ok() {
                tracing::info!("MariaDB is ready");
                return Ok(());
            }
        }

        Err(eyre!(
            "MariaDB did not become ready within {READY_ATTEMPTS} seconds"
        ))
    }

    fn remove(&self) {
        // Failures here only mean there was nothing to remove.
        let _ = cmd!("docker", "stop", self.name)
            .stdout_null()
            .stderr_null()
            .run();
        let _ = cmd!("docker", "rm", self.name)
            .stdout_null()
            .stderr_null()
            .run();
    }
}

impl Drop for MariaDbContainer {
    fn drop(&mut self) {
        tracing::info!(container = self.name, "Removing MariaDB container");
        self.remove();
    }
}
