// Domain layer: 食譜模型、組合形狀與對外的 ports。

pub mod model;
pub mod ports;
pub mod shape;
