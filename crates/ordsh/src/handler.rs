//! Command handler for the cache shell

use ordcache::{ConcurrentLruCache, Error};
use tracing::{debug, info};

use crate::command::{Command, HELP};
use crate::reply::Reply;

pub struct CommandHandler {
    cache: ConcurrentLruCache<String, String>,
    json_stats: bool,
}

impl CommandHandler {
    pub fn new(cache: ConcurrentLruCache<String, String>, json_stats: bool) -> Self {
        Self { cache, json_stats }
    }

    pub fn handle(&self, cmd: Command) -> Reply {
        debug!(?cmd, "handling command");
        match cmd {
            Command::Put { key, value } => {
                self.cache.put(key, value);
                Reply::Ok
            }
            Command::Get(key) => lookup(self.cache.get(&key)),
            Command::Peek(key) => lookup(self.cache.peek(&key)),
            Command::Del(key) => Reply::Integer(self.cache.remove(&key).is_some() as u64),
            Command::Exists(key) => Reply::Integer(self.cache.contains(&key) as u64),
            Command::Clear => {
                self.cache.clear();
                Reply::Ok
            }
            Command::Resize(max_size) => {
                let evicted = self.cache.set_max_size(max_size);
                info!(max_size, evicted, "cache resized");
                Reply::Integer(evicted as u64)
            }
            Command::Size => Reply::Integer(self.cache.len() as u64),
            Command::MaxSize => Reply::Integer(self.cache.max_size() as u64),
            Command::Keys => Reply::List(self.cache.keys()),
            Command::Stats => self.handle_stats(),
            Command::ResetStats => {
                self.cache.reset_stats();
                Reply::Ok
            }
            Command::Help => Reply::Text(HELP.to_string()),
            Command::Quit => Reply::Ok,
        }
    }

    fn handle_stats(&self) -> Reply {
        let stats = self.cache.stats_snapshot();

        if self.json_stats {
            return match serde_json::to_string(&stats) {
                Ok(json) => Reply::Text(json),
                Err(e) => Reply::Error(format!("failed to encode stats: {}", e)),
            };
        }

        Reply::Text(format!(
            "# Stats\n\
             size:{}\n\
             max_size:{}\n\
             hits:{}\n\
             misses:{}\n\
             hit_ratio:{:.4}\n\
             inserts:{}\n\
             updates:{}\n\
             removals:{}\n\
             evictions:{}",
            self.cache.len(),
            self.cache.max_size(),
            stats.hits,
            stats.misses,
            stats.hit_ratio,
            stats.inserts,
            stats.updates,
            stats.removals,
            stats.evictions,
        ))
    }
}

fn lookup(result: ordcache::Result<String>) -> Reply {
    match result {
        Ok(value) => Reply::Value(value),
        Err(Error::NoSuchElement) => Reply::Nil,
        Err(e) => Reply::Error(e.to_string()),
    }
}
