mod direction;
mod tiles;
