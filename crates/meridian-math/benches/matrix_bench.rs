// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use criterion::{criterion_group, criterion_main, Criterion};
use meridian_math::{simd, Matrix, Quat, Vec3};
use std::hint::black_box;

fn sample_pair() -> (Matrix, Matrix) {
    let view = Matrix::look_at(Vec3::new(3.0, 4.0, 5.0), Vec3::ZERO, Vec3::Y);
    let mut model = Matrix::from_translation_rotation(
        Vec3::new(1.0, -2.0, 0.5),
        Quat::from_axis_angle(Vec3::Y, 0.75),
    );
    model.multiply_3x3(2.0);
    (view, model)
}

fn bench_matrix(c: &mut Criterion) {
    let (view, model) = sample_pair();

    let mut group = c.benchmark_group("Matrix Product");
    group.bench_function("simd lanes", |b| {
        b.iter(|| black_box(black_box(view) * black_box(model)));
    });
    group.bench_function("scalar lanes", |b| {
        b.iter(|| black_box(black_box(view).mul_with::<simd::scalar::F32x4>(black_box(&model))));
    });
    group.finish();

    let mut group = c.benchmark_group("Matrix Inverse");
    group.bench_function("general", |b| {
        b.iter(|| black_box(black_box(model).inverted()));
    });
    group.bench_function("rigid", |b| {
        b.iter(|| black_box(black_box(view).fast_inverted()));
    });
    group.finish();
}

criterion_group!(benches, bench_matrix);
criterion_main!(benches);
