mod assignment;
mod concurrency;
mod recommendation;
mod service;
mod util;
