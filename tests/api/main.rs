mod health;
mod helpers;
mod memberships;
