// Infrastructure layer - browser transports
pub mod realtime;
