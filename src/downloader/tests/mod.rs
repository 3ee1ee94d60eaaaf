//! Downloader tests against scripted `sh` processes.
