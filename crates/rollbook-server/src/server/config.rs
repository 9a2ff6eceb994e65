use anyhow::ensure;
use clap::Parser;
use rollbook::PoolConfig;
use std::path::PathBuf;

/// Command-line and environment configuration for the record service.
#[derive(Debug, Parser)]
#[command(name = "rollbook-server", about = "Student record service with a concurrent averaging engine")]
pub struct CliArgs {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "ROLLBOOK_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: String,

    /// Path of the CSV file backing the record store.
    #[arg(long, env = "ROLLBOOK_DATA_FILE", default_value = "records.csv")]
    pub data_file: PathBuf,

    /// Worker threads spawned per averaging run.
    #[arg(long, env = "ROLLBOOK_NUM_WORKERS", default_value_t = num_cpus::get())]
    pub num_workers: usize,

    /// Upper bound on the number of records one averaging run may snapshot.
    #[arg(long, env = "ROLLBOOK_QUEUE_CAPACITY", default_value_t = 1024)]
    pub queue_capacity: usize,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub data_file: PathBuf,
    pub pool: PoolConfig,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        ensure!(args.num_workers > 0, "--num-workers must be at least 1");
        ensure!(args.queue_capacity > 0, "--queue-capacity must be at least 1");
        Ok(Self {
            addr: args.addr,
            data_file: args.data_file,
            pool: PoolConfig {
                num_workers: args.num_workers,
                queue_capacity: args.queue_capacity,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            addr: "127.0.0.1:0".to_owned(),
            data_file: PathBuf::from("records.csv"),
            num_workers: 4,
            queue_capacity: 1024,
        }
    }

    #[test]
    fn valid_args_convert() {
        let config = ServerConfig::try_from(args()).unwrap();
        assert_eq!(config.pool.num_workers, 4);
        assert_eq!(config.pool.queue_capacity, 1024);
    }

    #[test]
    fn zero_workers_is_rejected() {
        let config = ServerConfig::try_from(CliArgs {
            num_workers: 0,
            ..args()
        });
        assert!(config.is_err());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = ServerConfig::try_from(CliArgs {
            queue_capacity: 0,
            ..args()
        });
        assert!(config.is_err());
    }
}
