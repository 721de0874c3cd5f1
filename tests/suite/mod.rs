mod end_to_end;
mod export;
mod idempotency;
mod timers;
