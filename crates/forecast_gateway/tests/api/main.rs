mod healthz;
mod helpers;
mod tmd_client;
